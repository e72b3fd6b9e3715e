use anyhow::Result;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Run the `apod` binary against the environment's config file.
pub fn run_apod_command(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    let mut full_args = vec!["--no-color"];
    full_args.extend_from_slice(args);
    run_apod_command_with_env(env, &full_args, &[])
}

/// Like [`run_apod_command`] but leaves color handling to the binary and
/// sets extra environment variables.
pub fn run_apod_command_with_env(
    env: &TestEnvironment,
    args: &[&str],
    vars: &[(&str, &str)],
) -> Result<CommandOutput> {
    let config = env.config_path();
    let output = Command::new(env!("CARGO_BIN_EXE_apod"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env_remove("CLICOLOR_FORCE")
        .envs(vars.iter().copied())
        .current_dir(env.path())
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Serve `routes` (path -> body) over plain HTTP on an ephemeral port.
/// Unknown paths answer 404. Returns the base URL, e.g. `http://127.0.0.1:4242`.
pub fn serve(routes: &[(&str, &[u8])]) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let base = format!("http://{}", listener.local_addr()?);
    let routes: HashMap<String, Vec<u8>> = routes
        .iter()
        .map(|(path, body)| (path.to_string(), body.to_vec()))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let request_line = {
                let mut reader = BufReader::new(&stream);
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }
                request_line
            };

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let (status, body) = match routes.get(path) {
                Some(body) => ("200 OK", body.as_slice()),
                None => ("404 Not Found", &b""[..]),
            };
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
    });

    Ok(base)
}

/// A port on which nothing listens.
pub fn closed_port_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/apod/astropix.html"))
}
