// tests/server.rs
//
// Talks to a live command server over TCP.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;

use led_canvas::command::Response;
use led_canvas::config::{ServerConfig, StripConfig};
use led_canvas::server::{Server, MAX_LINE_BYTES};
use led_canvas::service::SharedCanvas;
use led_canvas::strip::drivers::{HeadlessDriver, HeadlessMonitor};
use led_canvas::LedStrip;
use test_log::test;

struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Client {
    fn send(&mut self, line: &str) -> Response {
        self.writer.write_all(line.as_bytes()).unwrap();
        self.writer.write_all(b"\n").unwrap();
        let mut reply = String::new();
        self.reader.read_line(&mut reply).unwrap();
        serde_json::from_str(&reply).unwrap()
    }
}

fn start() -> (Client, HeadlessMonitor) {
    let driver = HeadlessDriver::new();
    let monitor = driver.monitor();
    let mut strip = LedStrip::new(
        StripConfig {
            width: 16,
            height: 32,
            ..StripConfig::default()
        },
        Box::new(driver),
    );
    strip.init().unwrap();
    let canvas = Arc::new(SharedCanvas::new(strip, &ServerConfig::default()).unwrap());

    let server = Server::bind("127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run(canvas));

    let stream = TcpStream::connect(addr).unwrap();
    let client = Client {
        reader: BufReader::new(stream.try_clone().unwrap()),
        writer: stream,
    };
    (client, monitor)
}

#[test]
fn commands_round_trip_over_tcp() {
    let (mut client, monitor) = start();

    assert_eq!(client.send(r#"{"cmd":"width"}"#), Response::value(16));
    assert_eq!(
        client.send(r#"{"cmd":"set_rotate","degree":270,"flipX":false,"flipY":false}"#),
        Response::ok()
    );
    assert_eq!(client.send(r#"{"cmd":"width"}"#), Response::value(32));
    assert_eq!(client.send(r#"{"cmd":"height"}"#), Response::value(16));

    assert_eq!(
        client.send(r#"{"cmd":"draw_pixel","x":31,"y":15,"color":16711680}"#),
        Response::ok()
    );
    assert_eq!(
        client.send(r#"{"cmd":"pixel","x":31,"y":15}"#),
        Response::value(0xFF0000)
    );
    assert_eq!(
        client.send(r#"{"cmd":"draw_number","x":0,"y":0,"number":7,"color":65280}"#),
        Response::ok()
    );
    // Top row of a 3x5 seven is fully lit.
    assert_eq!(client.send(r#"{"cmd":"pixel","x":2,"y":0}"#), Response::value(0x00FF00));

    assert_eq!(client.send(r#"{"cmd":"render"}"#), Response::ok());
    assert_eq!(monitor.state().frames_rendered, 1);
}

#[test]
fn bad_requests_keep_the_connection_open() {
    let (mut client, _) = start();

    let reply = client.send("this is not json");
    assert!(!reply.ok);
    assert!(reply.error.unwrap().starts_with("bad request"));

    let reply = client.send(r#"{"cmd":"pixel","x":99,"y":0}"#);
    assert!(!reply.ok);

    let reply = client.send(r#"{"cmd":"set_rotate","degree":45}"#);
    assert!(!reply.ok);

    assert_eq!(client.send(r#"{"cmd":"clear"}"#), Response::ok());
}

#[test]
fn oversized_request_is_rejected_and_closed() {
    let (mut client, _) = start();

    let flood = vec![b'x'; MAX_LINE_BYTES + 1];
    client.writer.write_all(&flood).unwrap();
    let mut reply = String::new();
    client.reader.read_line(&mut reply).unwrap();
    let reply: Response = serde_json::from_str(&reply).unwrap();
    assert!(!reply.ok);
    assert!(reply.error.unwrap().contains("exceeds"));

    let mut rest = String::new();
    assert_eq!(client.reader.read_line(&mut rest).unwrap(), 0);
}
