//! SSH transport implementation using russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::FutureExt;
use log::{debug, trace, warn};
use russh::client::{self, Handle, Msg};
use russh::keys::{PublicKey, known_hosts};
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use super::config::{HostKeyVerification, SshConfig};
use super::{Connector, ShellSession};
use crate::error::{ChannelError, Result, TransportError};

/// Connector that opens a new russh session for every call to [`open`](Connector::open).
#[derive(Debug)]
pub struct SshConnector {
    config: SshConfig,
}

impl SshConnector {
    /// Create a connector for the given configuration.
    pub fn new(config: SshConfig) -> Self {
        if config.host_key_verification == HostKeyVerification::Disabled {
            warn!(
                "Host key verification disabled for {}; any server key will be accepted",
                config.socket_addr()
            );
        }
        Self { config }
    }

    /// Get the configuration used by this connector.
    pub fn config(&self) -> &SshConfig {
        &self.config
    }
}

impl Connector for SshConnector {
    type Session = SshSession;

    async fn open(&self) -> Result<SshSession> {
        SshSession::connect(&self.config).await
    }

    fn target(&self) -> String {
        format!("{}@{}", self.config.username, self.config.socket_addr())
    }
}

/// One authenticated SSH connection with an interactive PTY shell attached.
pub struct SshSession {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// Interactive shell channel.
    channel: Channel<Msg>,

    /// Set once the server sent EOF or closed the channel.
    remote_closed: bool,
}

impl SshSession {
    /// Connect to the SSH server, authenticate with a password and start a shell.
    pub async fn connect(config: &SshConfig) -> Result<Self> {
        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: Some(Duration::from_secs(60)),
            ..Default::default()
        });

        let handler = SshHandler::new(config);
        let host_key_error = handler.host_key_error.clone();

        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(ssh_config, (config.host.as_str(), config.port), handler),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|e| {
            // Prefer the detailed host-key error over russh's generic UnknownKey
            let stored = host_key_error
                .lock()
                .ok()
                .and_then(|mut slot| slot.take());
            match (stored, e) {
                (Some(hk_err), _) => hk_err,
                (None, russh::Error::IO(source)) => TransportError::ConnectionFailed {
                    host: config.host.clone(),
                    port: config.port,
                    source,
                },
                (None, e) => TransportError::Ssh(e),
            }
        })?;

        let authenticated = session
            .authenticate_password(&config.username, config.password.expose_secret())
            .await
            .map_err(TransportError::Ssh)?
            .success();

        if !authenticated {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }
        debug!("Authenticated to {} as {}", config.socket_addr(), config.username);

        let channel = session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_pty(
                true,
                "xterm",
                config.terminal_width,
                config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(ChannelError::PtyOpenFailed)?;

        channel
            .request_shell(true)
            .await
            .map_err(ChannelError::ShellRequestFailed)?;

        Ok(Self {
            session,
            channel,
            remote_closed: false,
        })
    }
}

impl ShellSession for SshSession {
    async fn send(&mut self, text: &str) -> Result<()> {
        trace!("send {:?}", text);
        self.channel
            .data(text.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if self.remote_closed {
            return Err(ChannelError::Closed.into());
        }

        // `wait` is backed by a queue, so dropping the pending future loses nothing
        while let Some(msg) = self.channel.wait().now_or_never() {
            match msg {
                Some(ChannelMsg::Data { ref data }) => out.extend_from_slice(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => out.extend_from_slice(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    debug!("Remote side closed the shell channel");
                    self.remote_closed = true;
                    break;
                }
                Some(other) => trace!("ignoring channel message {:?}", other),
            }
        }

        if out.is_empty() && self.remote_closed {
            return Err(ChannelError::Closed.into());
        }
        Ok(out)
    }

    async fn close(self) -> Result<()> {
        if !self.remote_closed {
            // The shell may already be gone after `exit`; that is not an error
            if let Err(e) = self.channel.close().await {
                trace!("channel close: {}", e);
            }
        }
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// Host key policy for one access point, run by russh during key exchange.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Detailed rejection reason, read by `connect` in place of russh's
    /// generic `UnknownKey`.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    fn new(config: &SshConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            host_key_verification: config.host_key_verification.clone(),
            known_hosts_path: config.known_hosts_path.clone(),
            host_key_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply the configured policy to the key the access point presented.
    fn verify(&self, key: &PublicKey) -> std::result::Result<(), TransportError> {
        if self.host_key_verification == HostKeyVerification::Disabled {
            return Ok(());
        }

        if self.is_known(key)? {
            trace!("Host key for {}:{} matches known_hosts", self.host, self.port);
            return Ok(());
        }

        match self.host_key_verification {
            HostKeyVerification::AcceptNew => {
                // A key that cannot be stored is still accepted for this session
                match self.remember(key) {
                    Ok(()) => debug!("Learned host key for {}:{}", self.host, self.port),
                    Err(e) => warn!("Failed to save host key: {}", e),
                }
                Ok(())
            }
            _ => Err(TransportError::HostKeyUnknown {
                host: self.host.clone(),
                port: self.port,
            }),
        }
    }

    /// `Ok(false)` when the host has no entry; `HostKeyChanged` when it has a
    /// different key of the same algorithm.
    fn is_known(&self, key: &PublicKey) -> std::result::Result<bool, TransportError> {
        let checked = match &self.known_hosts_path {
            Some(path) => known_hosts::check_known_hosts_path(&self.host, self.port, key, path),
            None => known_hosts::check_known_hosts(&self.host, self.port, key),
        };

        checked.map_err(|e| match e {
            russh::keys::Error::KeyChanged { line } => TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            },
            other => TransportError::KnownHosts(other.to_string()),
        })
    }

    fn remember(&self, key: &PublicKey) -> std::result::Result<(), TransportError> {
        match &self.known_hosts_path {
            Some(path) => known_hosts::learn_known_hosts_path(&self.host, self.port, key, path),
            None => known_hosts::learn_known_hosts(&self.host, self.port, key),
        }
        .map_err(|e| TransportError::KnownHosts(e.to_string()))
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match self.verify(server_public_key) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!("Rejecting host key for {}:{}: {}", self.host, self.port, e);
                if let Ok(mut slot) = self.host_key_error.lock() {
                    *slot = Some(e);
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use russh::keys::parse_public_key_base64;

    use super::*;

    const AP_KEY: &str = "AAAAC3NzaC1lZDI1NTE5AAAAIJdD7y3aLq454yWBdwLWbieU1ebz9/cu7/QEXn9OIeZJ";
    const OTHER_KEY: &str = "AAAAC3NzaC1lZDI1NTE5AAAAILIG2T/B0l0gaqj3puu510tu9N1OkQ4znY3LYuEm5zCF";

    fn known_hosts_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zyxssh-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("known_hosts")
    }

    fn handler(mode: HostKeyVerification, path: &Path) -> SshHandler {
        let mut config = SshConfig::new("10.0.0.2", "admin", "secret");
        config.port = 2222;
        config.host_key_verification = mode;
        config.known_hosts_path = Some(path.to_path_buf());
        SshHandler::new(&config)
    }

    #[test]
    fn test_accept_new_learns_then_matches() {
        let path = known_hosts_file("accept-new");
        let key = parse_public_key_base64(AP_KEY).unwrap();
        let ap = handler(HostKeyVerification::AcceptNew, &path);

        assert!(!ap.is_known(&key).unwrap());
        ap.verify(&key).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[10.0.0.2]:2222 ssh-ed25519"));
        assert!(ap.is_known(&key).unwrap());
        ap.verify(&key).unwrap();
    }

    #[test]
    fn test_changed_key_is_rejected() {
        let path = known_hosts_file("changed");
        let learned = handler(HostKeyVerification::AcceptNew, &path);
        learned.remember(&parse_public_key_base64(AP_KEY).unwrap()).unwrap();

        let other = parse_public_key_base64(OTHER_KEY).unwrap();
        for mode in [HostKeyVerification::AcceptNew, HostKeyVerification::Strict] {
            let err = handler(mode, &path).verify(&other).unwrap_err();
            assert!(
                matches!(err, TransportError::HostKeyChanged { port: 2222, .. }),
                "{err:?}"
            );
        }
    }

    #[test]
    fn test_strict_rejects_unknown_host() {
        let path = known_hosts_file("strict");
        let key = parse_public_key_base64(AP_KEY).unwrap();
        let ap = handler(HostKeyVerification::Strict, &path);

        let err = ap.verify(&key).unwrap_err();
        assert!(matches!(err, TransportError::HostKeyUnknown { port: 2222, .. }));
        assert!(!path.exists());

        ap.remember(&key).unwrap();
        ap.verify(&key).unwrap();
    }

    #[tokio::test]
    async fn test_rejection_is_kept_for_connect() {
        let path = known_hosts_file("rejection");
        let mut ap = handler(HostKeyVerification::Strict, &path);
        let key = parse_public_key_base64(AP_KEY).unwrap();

        let accepted = client::Handler::check_server_key(&mut ap, &key).await.unwrap();

        assert!(!accepted);
        let stored = ap.host_key_error.lock().unwrap().take();
        assert!(matches!(stored, Some(TransportError::HostKeyUnknown { .. })));
    }

    #[test]
    fn test_disabled_accepts_anything() {
        let path = known_hosts_file("disabled");
        let ap = handler(HostKeyVerification::Disabled, &path);
        ap.verify(&parse_public_key_base64(OTHER_KEY).unwrap()).unwrap();
        assert!(!path.exists());
    }
}
