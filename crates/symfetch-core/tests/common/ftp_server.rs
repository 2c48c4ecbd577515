//! Minimal anonymous FTP server for integration tests.
//!
//! Serves static files from a single directory over passive-mode data
//! connections (EPSV or PASV). Speaks just enough of the protocol for a
//! libcurl `ftp://` download: USER, PASS, PWD, CWD, TYPE, EPSV, PASV, SIZE,
//! RETR, QUIT. Counts control connections and records every command.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct FtpServerOptions {
    /// Answer PASS with 530 (anonymous login refused).
    pub refuse_login: bool,
}

struct Shared {
    directory: String,
    files: HashMap<String, Vec<u8>>,
    opts: FtpServerOptions,
    connections: AtomicUsize,
    commands: Mutex<Vec<String>>,
}

pub struct FtpServer {
    port: u16,
    shared: Arc<Shared>,
}

impl FtpServer {
    /// Starts a server in a background thread serving `files` inside `directory`.
    /// The server runs until the process exits.
    pub fn start(directory: &str, files: &[(&str, &[u8])]) -> Self {
        Self::start_with_options(directory, files, FtpServerOptions::default())
    }

    pub fn start_with_options(
        directory: &str,
        files: &[(&str, &[u8])],
        opts: FtpServerOptions,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let shared = Arc::new(Shared {
            directory: directory.to_string(),
            files: files
                .iter()
                .map(|(n, b)| (n.to_string(), b.to_vec()))
                .collect(),
            opts,
            connections: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
        });
        let accept_shared = Arc::clone(&shared);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                accept_shared.connections.fetch_add(1, Ordering::SeqCst);
                let shared = Arc::clone(&accept_shared);
                thread::spawn(move || handle(stream, &shared));
            }
        });
        FtpServer { port, shared }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Number of control connections accepted so far.
    pub fn connections(&self) -> usize {
        self.shared.connections.load(Ordering::SeqCst)
    }

    /// Every command received, e.g. `"RETR nasdaqlisted.txt"`.
    pub fn commands(&self) -> Vec<String> {
        self.shared.commands.lock().unwrap().clone()
    }

    /// Commands whose verb is `verb`.
    pub fn count(&self, verb: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.split(' ').next() == Some(verb))
            .count()
    }
}

fn reply(out: &mut TcpStream, line: &str) -> bool {
    out.write_all(format!("{}\r\n", line).as_bytes()).is_ok()
}

fn handle(stream: TcpStream, shared: &Shared) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut out = match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut reader = BufReader::new(stream);
    if !reply(&mut out, "220 symfetch test server ready") {
        return;
    }

    let mut cwd: Option<String> = None;
    let mut passive: Option<TcpListener> = None;

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let line = line.trim_end().to_string();
        shared.commands.lock().unwrap().push(line.clone());
        let (verb, arg) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        let lookup = |cwd: &Option<String>, name: &str| -> Option<Vec<u8>> {
            if cwd.as_deref() == Some(shared.directory.as_str()) {
                shared.files.get(name).cloned()
            } else {
                None
            }
        };

        let ok = match verb.to_ascii_uppercase().as_str() {
            "USER" => reply(&mut out, "331 Please specify the password."),
            "PASS" => {
                if shared.opts.refuse_login {
                    reply(&mut out, "530 Login incorrect.")
                } else {
                    reply(&mut out, "230 Login successful.")
                }
            }
            "PWD" => reply(&mut out, "257 \"/\" is the current directory"),
            "CWD" => {
                if arg == shared.directory {
                    cwd = Some(arg.to_string());
                    reply(&mut out, "250 Directory successfully changed.")
                } else {
                    reply(&mut out, "550 Failed to change directory.")
                }
            }
            "TYPE" => reply(&mut out, &format!("200 Switching to {} mode.", arg)),
            "EPSV" => match TcpListener::bind("127.0.0.1:0") {
                Ok(l) => {
                    let port = l.local_addr().map(|a| a.port()).unwrap_or(0);
                    passive = Some(l);
                    reply(
                        &mut out,
                        &format!("229 Entering Extended Passive Mode (|||{}|)", port),
                    )
                }
                Err(_) => reply(&mut out, "425 Cannot open data connection."),
            },
            "PASV" => match TcpListener::bind("127.0.0.1:0") {
                Ok(l) => {
                    let port = l.local_addr().map(|a| a.port()).unwrap_or(0);
                    passive = Some(l);
                    reply(
                        &mut out,
                        &format!(
                            "227 Entering Passive Mode (127,0,0,1,{},{}).",
                            port / 256,
                            port % 256
                        ),
                    )
                }
                Err(_) => reply(&mut out, "425 Cannot open data connection."),
            },
            "SIZE" => match lookup(&cwd, arg) {
                Some(body) => reply(&mut out, &format!("213 {}", body.len())),
                None => reply(&mut out, "550 Could not get file size."),
            },
            "RETR" => match (lookup(&cwd, arg), passive.take()) {
                (None, _) => reply(&mut out, "550 Failed to open file."),
                (Some(_), None) => reply(&mut out, "425 Use PASV or EPSV first."),
                (Some(body), Some(listener)) => {
                    if !reply(
                        &mut out,
                        &format!("150 Opening BINARY mode data connection for {}", arg),
                    ) {
                        return;
                    }
                    match listener.accept() {
                        Ok((mut data, _)) => {
                            let sent = data.write_all(&body).is_ok();
                            drop(data);
                            if sent {
                                reply(&mut out, "226 Transfer complete.")
                            } else {
                                reply(&mut out, "426 Connection closed; transfer aborted.")
                            }
                        }
                        Err(_) => reply(&mut out, "425 Cannot open data connection."),
                    }
                }
            },
            "QUIT" => {
                reply(&mut out, "221 Goodbye.");
                return;
            }
            _ => reply(&mut out, "502 Command not implemented."),
        };
        if !ok {
            return;
        }
    }
}
