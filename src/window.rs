// src/window.rs

//! Hierarchical window compositor.
//!
//! Windows live in a [`Compositor`] arena and are addressed by [`WindowId`]
//! handles. Each window owns a private [`Pixmap`] and an ordered registry of
//! children: other windows (by handle) and shared drawable sources, each at
//! an integer offset in the window's logical space.
//!
//! Reading a window through [`Compositor::window`] composites its subtree:
//! children are consulted in registration order and the first child covering
//! the point supplies the color, unless the window is transparent and that
//! color equals the child's declared background, in which case the search
//! continues and finally falls back to the window's own buffer.
//!
//! Writing ([`Compositor::window_mut`]) always targets the window's own buffer,
//! never a child's.
//!
//! ## Handles
//! A handle carries a slot index and a generation counter. Destroying a window
//! bumps the generation so stale handles fail with `StaleWindow` instead of
//! aliasing whatever reuses the slot.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::canvas::{PaintDevice, PaintSource};
use crate::color::Color;
use crate::error::{check_bounds, CanvasError, Result};
use crate::orientation::Flip;
use crate::pixmap::Pixmap;

/// A drawable shared between the caller and any number of windows.
pub type SharedSource = Arc<dyn PaintSource + Send + Sync>;

/// Handle to a window in a [`Compositor`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId {
    idx: u32,
    generation: u32,
}

impl WindowId {
    /// Raw slot index (for diagnostics only).
    pub fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Handle to one registration of a shared source under a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({})", self.0)
    }
}

/// A registry entry as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Window(WindowId),
    Source(SourceId),
}

enum Node {
    Window(WindowId),
    Source(SourceId, SharedSource),
}

impl Node {
    fn as_child(&self) -> Child {
        match self {
            Node::Window(id) => Child::Window(*id),
            Node::Source(id, _) => Child::Source(*id),
        }
    }
}

struct ChildEntry {
    node: Node,
    x: i32,
    y: i32,
}

/// A window's own state: its buffer, flags and child registry.
///
/// As a [`PaintSource`] a bare `Window` exposes only its own buffer; use
/// [`Compositor::window`] for the composited view.
pub struct Window {
    buffer: Pixmap,
    children: Vec<ChildEntry>,
    parent: Option<WindowId>,
}

impl Window {
    fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: Pixmap::new(width, height),
            children: Vec::new(),
            parent: None,
        }
    }

    /// The window's own buffer, without children.
    pub fn buffer(&self) -> &Pixmap {
        &self.buffer
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn entry_index(&self, child: Child) -> Option<usize> {
        self.children.iter().position(|e| e.node.as_child() == child)
    }
}

impl PaintSource for Window {
    fn width(&self) -> usize {
        self.buffer.width()
    }

    fn height(&self) -> usize {
        self.buffer.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        self.buffer.pixel(x, y)
    }

    fn background(&self) -> Color {
        self.buffer.background()
    }
}

impl PaintDevice for Window {
    fn pixel_mut(&mut self, x: i32, y: i32) -> Result<&mut Color> {
        self.buffer.pixel_mut(x, y)
    }

    fn set_background(&mut self, color: Color) {
        self.buffer.set_background(color);
    }

    fn set_transparent(&mut self, transparent: bool) {
        self.buffer.set_transparent(transparent);
    }

    fn is_transparent(&self) -> bool {
        self.buffer.is_transparent()
    }

    fn set_rotation(&mut self, degree: i32, flip: Flip) -> Result<()> {
        self.buffer.set_rotation(degree, flip)
    }

    fn clear(&mut self) -> Result<()> {
        self.buffer.clear()
    }
}

struct Slot {
    generation: u32,
    window: Option<Window>,
}

/// Arena owning every window and the topology between them.
#[derive(Default)]
pub struct Compositor {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    next_source: u32,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live windows.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a parentless `width x height` window.
    pub fn create_window(&mut self, width: usize, height: usize) -> WindowId {
        let window = Window::new(width, height);
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.window = Some(window);
            WindowId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                window: Some(window),
            });
            WindowId { idx, generation: 0 }
        };
        debug!("Compositor: created {} ({}x{})", id, width, height);
        id
    }

    /// Creates a window and registers it under `parent` at `(x, y)`.
    pub fn create_child(
        &mut self,
        parent: WindowId,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    ) -> Result<WindowId> {
        self.get(parent)?;
        let id = self.create_window(width, height);
        self.add(parent, id, x, y)?;
        Ok(id)
    }

    /// Destroys a window.
    ///
    /// The window is erased from its parent's registry. Its child windows are
    /// orphaned, not destroyed; its source registrations are dropped.
    pub fn destroy(&mut self, id: WindowId) -> Result<()> {
        self.get(id)?;
        self.unlink(id);
        let slot = &mut self.slots[id.idx as usize];
        let window = slot.window.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.idx);

        if let Some(window) = window {
            for entry in window.children {
                if let Node::Window(child) = entry.node {
                    if let Ok(child) = self.get_mut(child) {
                        child.parent = None;
                    }
                }
            }
        }
        debug!("Compositor: destroyed {}", id);
        Ok(())
    }

    pub fn is_alive(&self, id: WindowId) -> bool {
        self.get(id).is_ok()
    }

    /// Registers `child` under `parent` at `(x, y)`, appended after existing
    /// children.
    ///
    /// A child that already has a parent is removed from it first. Adding a
    /// window under itself or one of its descendants fails with `Cycle` and
    /// changes nothing.
    pub fn add(&mut self, parent: WindowId, child: WindowId, x: i32, y: i32) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(CanvasError::Cycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        if let Some(old) = self.unlink(child) {
            debug!("Compositor: reparenting {} from {} to {}", child, old, parent);
        }
        self.get_mut(parent)?.children.push(ChildEntry {
            node: Node::Window(child),
            x,
            y,
        });
        self.get_mut(child)?.parent = Some(parent);
        trace!("Compositor: {} added under {} at ({}, {})", child, parent, x, y);
        Ok(())
    }

    /// Registers a shared source under `parent` at `(x, y)`.
    ///
    /// The same source may be registered any number of times; each
    /// registration gets its own [`SourceId`].
    pub fn add_source(
        &mut self,
        parent: WindowId,
        source: SharedSource,
        x: i32,
        y: i32,
    ) -> Result<SourceId> {
        let id = SourceId(self.next_source);
        self.get_mut(parent)?.children.push(ChildEntry {
            node: Node::Source(id, source),
            x,
            y,
        });
        self.next_source = self.next_source.wrapping_add(1);
        trace!("Compositor: {} added under {} at ({}, {})", id, parent, x, y);
        Ok(id)
    }

    /// Erases `child` from `parent`'s registry and clears its parent link.
    pub fn remove(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        self.get(child)?;
        self.remove_entry(parent, Child::Window(child))?;
        self.get_mut(child)?.parent = None;
        debug!("Compositor: removed {} from {}", child, parent);
        Ok(())
    }

    /// Erases one source registration from `parent`.
    pub fn remove_source(&mut self, parent: WindowId, source: SourceId) -> Result<()> {
        self.remove_entry(parent, Child::Source(source))
    }

    /// Moves a window to `(x, y)` within its parent.
    ///
    /// Fails with `Orphan` if the window has no parent.
    pub fn move_window(&mut self, id: WindowId, x: i32, y: i32) -> Result<()> {
        let parent = self
            .get(id)?
            .parent
            .ok_or_else(|| CanvasError::Orphan(id.to_string()))?;
        self.set_offset(parent, Child::Window(id), x, y)
    }

    /// Moves a source registration to `(x, y)` within `parent`.
    pub fn move_source(&mut self, parent: WindowId, source: SourceId, x: i32, y: i32) -> Result<()> {
        self.set_offset(parent, Child::Source(source), x, y)
    }

    pub fn parent(&self, id: WindowId) -> Result<Option<WindowId>> {
        Ok(self.get(id)?.parent)
    }

    /// Offset of a window within its parent, or `None` for an orphan.
    pub fn position(&self, id: WindowId) -> Result<Option<(i32, i32)>> {
        let Some(parent) = self.get(id)?.parent else {
            return Ok(None);
        };
        let parent = self.get(parent)?;
        Ok(parent
            .entry_index(Child::Window(id))
            .map(|i| (parent.children[i].x, parent.children[i].y)))
    }

    /// Registry of `id` in registration order, with offsets.
    pub fn children(&self, id: WindowId) -> Result<Vec<(Child, i32, i32)>> {
        Ok(self
            .get(id)?
            .children
            .iter()
            .map(|e| (e.node.as_child(), e.x, e.y))
            .collect())
    }

    pub fn child_count(&self, id: WindowId) -> Result<usize> {
        Ok(self.get(id)?.child_count())
    }

    /// Composited, read-only view of a window tree.
    pub fn window(&self, id: WindowId) -> Result<WindowView<'_>> {
        Ok(WindowView {
            compositor: self,
            window: self.get(id)?,
        })
    }

    /// The window's own state, for drawing into its buffer or changing flags.
    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        self.get_mut(id)
    }

    /// Composited color of `id` at `(x, y)`.
    pub fn pixel(&self, id: WindowId, x: i32, y: i32) -> Result<Color> {
        self.composite_pixel(self.get(id)?, x, y)
    }

    /// Flattens a window tree into a new pixmap.
    pub fn snapshot(&self, id: WindowId) -> Result<Pixmap> {
        Pixmap::from_source(&self.window(id)?)
    }

    /// Composites the tree rooted at `src` into `dst`'s own buffer.
    pub fn draw_window(&mut self, dst: WindowId, src: WindowId, x: i32, y: i32, flip: Flip) -> Result<()> {
        let flattened = self.snapshot(src)?;
        self.get_mut(dst)?.draw(&flattened, x, y, flip)
    }

    fn composite_pixel(&self, window: &Window, x: i32, y: i32) -> Result<Color> {
        check_bounds(x, y, window.width(), window.height())?;
        let transparent = window.is_transparent();

        for entry in &window.children {
            let (lx, ly) = (x as i64 - entry.x as i64, y as i64 - entry.y as i64);
            if lx < 0 || ly < 0 {
                continue;
            }
            let (color, key) = match &entry.node {
                Node::Window(id) => {
                    let child = self.get(*id)?;
                    if lx >= child.width() as i64 || ly >= child.height() as i64 {
                        continue;
                    }
                    (self.composite_pixel(child, lx as i32, ly as i32)?, child.background())
                }
                Node::Source(_, source) => {
                    if lx >= source.width() as i64 || ly >= source.height() as i64 {
                        continue;
                    }
                    (source.pixel(lx as i32, ly as i32)?, source.background())
                }
            };
            if transparent && color == key {
                continue;
            }
            return Ok(color);
        }
        window.buffer.pixel(x, y)
    }

    fn is_ancestor_or_self(&self, candidate: WindowId, mut id: WindowId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.get(id).ok().and_then(|w| w.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Detaches `id` from its parent, returning the old parent.
    fn unlink(&mut self, id: WindowId) -> Option<WindowId> {
        let parent = self.get_mut(id).ok()?.parent.take()?;
        if let Ok(p) = self.get_mut(parent) {
            p.children
                .retain(|e| !matches!(e.node, Node::Window(c) if c == id));
        }
        Some(parent)
    }

    fn remove_entry(&mut self, parent: WindowId, child: Child) -> Result<()> {
        let window = self.get_mut(parent)?;
        let idx = window
            .entry_index(child)
            .ok_or_else(|| CanvasError::NotAChild {
                parent: parent.to_string(),
                child: format!("{:?}", child),
            })?;
        window.children.remove(idx);
        Ok(())
    }

    fn set_offset(&mut self, parent: WindowId, child: Child, x: i32, y: i32) -> Result<()> {
        let window = self.get_mut(parent)?;
        let idx = window
            .entry_index(child)
            .ok_or_else(|| CanvasError::NotAChild {
                parent: parent.to_string(),
                child: format!("{:?}", child),
            })?;
        let entry = &mut window.children[idx];
        entry.x = x;
        entry.y = y;
        trace!("Compositor: {:?} moved to ({}, {}) in {}", child, x, y, parent);
        Ok(())
    }

    fn get(&self, id: WindowId) -> Result<&Window> {
        self.slots
            .get(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.window.as_ref())
            .ok_or_else(|| CanvasError::StaleWindow(id.to_string()))
    }

    fn get_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        self.slots
            .get_mut(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.window.as_mut())
            .ok_or_else(|| CanvasError::StaleWindow(id.to_string()))
    }
}

/// A window tree seen through the compositor.
pub struct WindowView<'a> {
    compositor: &'a Compositor,
    window: &'a Window,
}

impl PaintSource for WindowView<'_> {
    fn width(&self) -> usize {
        self.window.width()
    }

    fn height(&self) -> usize {
        self.window.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        self.compositor.composite_pixel(self.window, x, y)
    }

    fn background(&self) -> Color {
        self.window.background()
    }
}
