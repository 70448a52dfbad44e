//! TCP listener with one worker thread per connection.

use std::io::{self, Read};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::{ConfigError, ServerConfig};
use crate::session::{Session, SessionContext};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
    context: SessionContext,
}

impl Server {
    /// Bind the listener described by `config`.
    ///
    /// # Errors
    /// Returns `ServerError` for an invalid config or when the address cannot
    /// be bound.
    pub fn bind(config: ServerConfig, context: SessionContext) -> Result<Self, ServerError> {
        config.validate()?;
        let addr = config.bind_addr();
        let listener =
            TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
        info!("listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            config,
            context,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, spawning a worker per client.
    ///
    /// Accept failures are logged and skipped; they never stop the loop.
    pub fn run(&self) -> Result<(), ServerError> {
        let port = self.local_addr()?.port();
        self.context
            .sink
            .write(&format!("-------- Log server listening on port {port} --------\n"));

        for incoming in self.listener.incoming() {
            match incoming {
                Ok(stream) => self.spawn_worker(stream),
                Err(err) => warn!("failed to accept connection: {err}"),
            }
        }
        Ok(())
    }

    fn spawn_worker(&self, stream: TcpStream) {
        let peer = match stream.peer_addr() {
            Ok(peer) => peer,
            Err(err) => {
                warn!("dropping connection without peer address: {err}");
                return;
            }
        };
        let context = self.context.clone();
        let read_buffer = self.config.read_buffer;
        let spawned = thread::Builder::new()
            .name(format!("conn-{peer}"))
            .spawn(move || serve_connection(stream, peer, read_buffer, &context));
        match spawned {
            Ok(_) => debug!("worker started for {peer}"),
            Err(err) => error!("failed to spawn worker for {peer}: {err}"),
        }
    }
}

/// Read `stream` until the peer closes it or a read fails.
pub fn serve_connection<R: Read>(
    mut stream: R,
    peer: SocketAddr,
    read_buffer: usize,
    context: &SessionContext,
) {
    let mut session = Session::open(context, peer);
    let mut buf = vec![0u8; read_buffer.max(1)];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => session.receive(&buf[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!("read from {peer} failed: {err}");
                break;
            }
        }
    }
    session.close();
}

#[cfg(test)]
mod tests {
    use super::{Server, ServerError, serve_connection};
    use crate::clock::Clock;
    use crate::config::ServerConfig;
    use crate::layouts::LayoutRegistry;
    use crate::session::SessionContext;
    use crate::sink::MemorySink;
    use std::io::{self, Cursor, Read};
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    fn context(sink: &Arc<MemorySink>) -> SessionContext {
        SessionContext::new(
            Arc::new(LayoutRegistry::builtin().unwrap()),
            sink.clone(),
            Clock::utc(),
        )
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn serve_connection_reads_in_small_chunks() {
        let sink = Arc::new(MemorySink::new());
        let input = Cursor::new(b"one\ntwo\n".to_vec());
        serve_connection(input, "127.0.0.1:4000".parse().unwrap(), 3, &context(&sink));

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("]: one"));
        assert!(lines[2].ends_with("]: two"));
        assert!(lines[3].ends_with("closed."));
    }

    #[test]
    fn read_error_closes_session() {
        let sink = Arc::new(MemorySink::new());
        serve_connection(
            FailingReader,
            "127.0.0.1:4000".parse().unwrap(),
            16,
            &context(&sink),
        );
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("Connection from 127.0.0.1 closed."));
    }

    #[test]
    fn bind_rejects_invalid_config() {
        let sink = Arc::new(MemorySink::new());
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            read_buffer: 0,
        };
        let err = match Server::bind(config, context(&sink)) {
            Ok(_) => panic!("expected invalid config to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn bind_ephemeral_port() {
        let sink = Arc::new(MemorySink::new());
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            ..ServerConfig::default()
        };
        let server = Server::bind(config, context(&sink)).unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
