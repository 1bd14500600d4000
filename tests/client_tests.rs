//! Client Tests
//!
//! End-to-end tests for the client against a scripted in-process server
//! speaking the wire protocol over a loopback socket. The fixture keeps
//! its store in insertion order so the KEYS ordering contract is
//! observable.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use sterling_client::{Client, Config, SterlingError, Value};

// =============================================================================
// Test Fixture
// =============================================================================

/// Start a fixture server seeded with `initial` entries
///
/// Accepts one connection and serves it until the peer closes.
fn setup_server(initial: &[(&str, &str)]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let mut store: Vec<(String, String)> = initial
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            serve(stream, &mut store);
        }
    });

    addr
}

fn setup_client(addr: SocketAddr) -> Client {
    Client::connect(config_for(addr)).unwrap()
}

fn config_for(addr: SocketAddr) -> Config {
    Config::builder()
        .host(addr.ip().to_string())
        .port(addr.port())
        .build()
}

/// Serve one connection: read request lines, apply them to the store,
/// write one reply line each
fn serve(stream: TcpStream, store: &mut Vec<(String, String)>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = stream;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let reply = respond(line.trim(), store);
        if writer.write_all(format!("{}\n", reply).as_bytes()).is_err() {
            return;
        }
    }
}

fn respond(request: &str, store: &mut Vec<(String, String)>) -> String {
    let mut parts = request.split_whitespace();
    match parts.next() {
        Some("SET") => {
            let key = parts.next().unwrap().to_string();
            let value = parts.next().unwrap().to_string();
            match store.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => store.push((key, value)),
            }
            "OK".to_string()
        }
        Some("GET") => {
            let key = parts.next().unwrap();
            store
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| "(nil)".to_string())
        }
        Some("DEL") => {
            let key = parts.next().unwrap();
            match store.iter().position(|(k, _)| k == key) {
                Some(index) => {
                    store.remove(index);
                    "OK".to_string()
                }
                None => "ERROR no such key".to_string(),
            }
        }
        Some("EXISTS") => {
            let key = parts.next().unwrap();
            if store.iter().any(|(k, _)| k == key) {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        Some("EXPIRE") => {
            let key = parts.next().unwrap();
            if store.iter().any(|(k, _)| k == key) {
                "OK".to_string()
            } else {
                "ERROR no such key".to_string()
            }
        }
        Some("TTL") => {
            let key = parts.next().unwrap();
            if store.iter().any(|(k, _)| k == key) {
                "42".to_string()
            } else {
                "ERROR no such key".to_string()
            }
        }
        Some("KEYS") => {
            if store.is_empty() {
                "(empty)".to_string()
            } else {
                store
                    .iter()
                    .map(|(k, _)| k.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
        _ => "ERROR unknown command".to_string(),
    }
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_set_then_get_round_trip() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert!(client.set("a", "1").unwrap());
    let value = client.get("a").unwrap().expect("value should be present");
    assert_eq!(value, "1");
}

#[test]
fn test_set_overwrites_existing_value() {
    let addr = setup_server(&[("a", "1")]);
    let mut client = setup_client(addr);

    assert!(client.set("a", "2").unwrap());
    assert_eq!(client.get("a").unwrap().unwrap(), "2");
}

#[test]
fn test_get_missing_key_is_none() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert_eq!(client.get("ghost").unwrap(), None);
}

#[test]
fn test_delete_then_exists_is_false() {
    let addr = setup_server(&[("a", "1")]);
    let mut client = setup_client(addr);

    assert!(client.exists("a").unwrap());
    assert!(client.delete("a").unwrap());
    assert!(!client.exists("a").unwrap());
    assert_eq!(client.get("a").unwrap(), None);
}

#[test]
fn test_delete_missing_key_is_false() {
    // The server replies with error text; the client reports false, not
    // an error.
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert!(!client.delete("ghost").unwrap());
}

#[test]
fn test_expire_existing_key_is_true() {
    let addr = setup_server(&[("session", "abc")]);
    let mut client = setup_client(addr);

    assert!(client.expire("session", 10).unwrap());
}

#[test]
fn test_expire_missing_key_is_false() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert!(!client.expire("ghost", 10).unwrap());
}

#[test]
fn test_ttl_returns_integer() {
    let addr = setup_server(&[("session", "abc")]);
    let mut client = setup_client(addr);

    assert_eq!(client.ttl("session").unwrap(), 42);
}

#[test]
fn test_ttl_error_reply_is_parse_error() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    match client.ttl("ghost") {
        Err(SterlingError::Parse { reply, .. }) => assert_eq!(reply, "ERROR no such key"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_keys_empty_store_is_empty_vec() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert!(client.keys().unwrap().is_empty());
}

#[test]
fn test_keys_preserves_server_order() {
    let addr = setup_server(&[("first", "1"), ("second", "2"), ("third", "3")]);
    let mut client = setup_client(addr);

    let keys: Vec<String> = client
        .keys()
        .unwrap()
        .into_iter()
        .map(Value::into_string)
        .collect();
    assert_eq!(keys, ["first", "second", "third"]);
}

#[test]
fn test_send_command_raw_round_trip() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert_eq!(client.send_command("SET raw 7").unwrap(), "OK");
    assert_eq!(client.send_command("GET raw").unwrap(), "7");
}

// =============================================================================
// Output Representation Tests
// =============================================================================

#[test]
fn test_decoded_values_are_text() {
    let addr = setup_server(&[("a", "1")]);
    let mut client = setup_client(addr);

    match client.get("a").unwrap().unwrap() {
        Value::Text(text) => assert_eq!(text, "1"),
        other => panic!("expected text value, got {:?}", other),
    }
}

#[test]
fn test_raw_values_are_bytes() {
    let addr = setup_server(&[("a", "1")]);
    let config = Config::builder()
        .host(addr.ip().to_string())
        .port(addr.port())
        .decode_responses(false)
        .build();
    let mut client = Client::connect(config).unwrap();

    match client.get("a").unwrap().unwrap() {
        Value::Raw(bytes) => assert_eq!(&bytes[..], b"1"),
        other => panic!("expected raw value, got {:?}", other),
    }
}

// =============================================================================
// Connection Lifecycle Tests
// =============================================================================

#[test]
fn test_connect_unreachable_endpoint_fails() {
    // Bind then drop a listener so the port is known to refuse.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(matches!(
        Client::connect(config_for(addr)),
        Err(SterlingError::Connection(_))
    ));
}

#[test]
fn test_close_is_idempotent() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    assert!(client.is_connected());
    client.close();
    client.close();
    assert!(!client.is_connected());
}

#[test]
fn test_operation_after_close_is_connection_error() {
    let addr = setup_server(&[]);
    let mut client = setup_client(addr);

    client.close();
    assert!(matches!(
        client.set("a", "1"),
        Err(SterlingError::Connection(_))
    ));
}

#[test]
fn test_severed_connection_is_connection_error() {
    // The server accepts, then immediately drops the connection.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let _ = listener.accept();
    });

    let mut client = setup_client(addr);
    assert!(matches!(
        client.get("a"),
        Err(SterlingError::Connection(_))
    ));
}

#[test]
fn test_drop_closes_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        // EOF on the request stream means the peer released the socket.
        while reader.read_line(&mut line).unwrap_or(0) != 0 {
            line.clear();
        }
        tx.send(()).unwrap();
    });

    {
        let _client = setup_client(addr);
    }

    rx.recv_timeout(Duration::from_secs(5))
        .expect("connection should close when the client is dropped");
}
