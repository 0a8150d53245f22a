//! Scripted in-memory shell used by the executor, snapshot and control tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{Connector, ShellSession};
use crate::error::{ChannelError, Result, TransportError};

const BANNER: &str = "\r\nWelcome to NWA50AX\r\nRouter> ";
const PROMPT: &str = "Router> ";

#[derive(Default)]
struct Script {
    replies: HashMap<String, String>,
    fail_opens: HashSet<usize>,
    fail_sends: HashSet<String>,
    close_after: HashSet<String>,
    silent: bool,
    idle_gap: usize,
}

/// Connector whose sessions answer commands from a fixed script.
///
/// Each command reply is delivered as echo, body and prompt in three reads.
/// Unknown commands get only the echo and a prompt, unless the connector is
/// [`silent`](Self::silent), in which case nothing at all is returned.
#[derive(Clone, Default)]
pub(crate) struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
    sent: Arc<Mutex<Vec<String>>>,
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, command: &str, body: &str) -> Self {
        self.edit(|s| {
            s.replies.insert(command.to_string(), body.to_string());
        })
    }

    /// Fail the n-th (1-based) session open.
    pub(crate) fn fail_open(self, nth: usize) -> Self {
        self.edit(|s| {
            s.fail_opens.insert(nth);
        })
    }

    pub(crate) fn fail_send(self, command: &str) -> Self {
        self.edit(|s| {
            s.fail_sends.insert(command.to_string());
        })
    }

    /// Close the channel from the remote side once `command` has answered.
    pub(crate) fn close_after(self, command: &str) -> Self {
        self.edit(|s| {
            s.close_after.insert(command.to_string());
        })
    }

    pub(crate) fn silent(self) -> Self {
        self.edit(|s| s.silent = true)
    }

    /// Return `reads` empty reads after every delivered chunk.
    pub(crate) fn idle_gap(self, reads: usize) -> Self {
        self.edit(|s| s.idle_gap = reads)
    }

    /// Every line sent to any session, newline stripped.
    pub(crate) fn sent_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.sent.clone()
    }

    pub(crate) fn close_count(&self) -> Arc<AtomicUsize> {
        self.closes.clone()
    }

    fn edit(self, f: impl FnOnce(&mut Script)) -> Self {
        f(&mut self.script.lock().unwrap());
        self
    }
}

impl Connector for ScriptedConnector {
    type Session = ScriptedSession;

    async fn open(&self) -> Result<ScriptedSession> {
        let nth = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
        let (silent, idle_gap) = {
            let script = self.script.lock().unwrap();
            if script.fail_opens.contains(&nth) {
                return Err(TransportError::AuthenticationFailed {
                    user: "admin".to_string(),
                }
                .into());
            }
            (script.silent, script.idle_gap)
        };

        let mut pending = VecDeque::new();
        if !silent {
            pending.push_back(BANNER.as_bytes().to_vec());
        }
        Ok(ScriptedSession {
            script: self.script.clone(),
            sent: self.sent.clone(),
            closes: self.closes.clone(),
            pending,
            idle_gap,
            gap_left: 0,
            remote_closed: false,
            closing: false,
        })
    }

    fn target(&self) -> String {
        "admin@scripted:22".to_string()
    }
}

pub(crate) struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    sent: Arc<Mutex<Vec<String>>>,
    closes: Arc<AtomicUsize>,
    pending: VecDeque<Vec<u8>>,
    idle_gap: usize,
    gap_left: usize,
    remote_closed: bool,
    closing: bool,
}

impl ShellSession for ScriptedSession {
    async fn send(&mut self, text: &str) -> Result<()> {
        if self.remote_closed {
            return Err(ChannelError::Closed.into());
        }
        let line = text.trim_end_matches('\n').to_string();
        self.sent.lock().unwrap().push(line.clone());

        let script = self.script.lock().unwrap();
        if script.fail_sends.contains(&line) {
            return Err(ChannelError::Closed.into());
        }
        if script.silent {
            return Ok(());
        }

        self.pending.push_back(format!("{}\r\n", line).into_bytes());
        if let Some(body) = script.replies.get(&line) {
            self.pending.push_back(body.as_bytes().to_vec());
        }
        if script.close_after.contains(&line) {
            self.closing = true;
        } else {
            self.pending.push_back(PROMPT.as_bytes().to_vec());
        }
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        if self.gap_left > 0 {
            self.gap_left -= 1;
            return Ok(Vec::new());
        }
        match self.pending.pop_front() {
            Some(chunk) => {
                self.gap_left = self.idle_gap;
                Ok(chunk)
            }
            None if self.closing || self.remote_closed => {
                self.remote_closed = true;
                Err(ChannelError::Closed.into())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn close(self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
