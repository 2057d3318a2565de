//! Local stand-in for the Last.fm web service.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Answers every request with the next canned body, repeating the last one
/// once the list runs out. Request lines are recorded in arrival order.
pub struct StubLastFm {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubLastFm {
    pub fn start(bodies: &[&str]) -> Self {
        assert!(!bodies.is_empty(), "stub needs at least one body");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/2.0/", listener.local_addr().unwrap());
        let bodies: Vec<String> = bodies.iter().map(|body| body.to_string()).collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Ok(reader_stream) = stream.try_clone() else { break };
                let mut reader = BufReader::new(reader_stream);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                // Drain the headers; GET requests carry no body.
                let mut header = String::new();
                while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
                    header.clear();
                }

                let served = {
                    let mut requests = recorded.lock().unwrap();
                    requests.push(request_line.trim_end().to_string());
                    requests.len()
                };
                let body = &bodies[(served - 1).min(bodies.len() - 1)];

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
