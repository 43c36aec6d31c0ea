//! Line-oriented console transport for running the bot locally
//!
//! Each input line is a text message, except `[label]` which presses the
//! button with that label.

use super::{Inbound, Outbound};
use crate::listings::ListingProvider;
use crate::runtime::{ConversationEngine, PreferenceStore};
use crate::state_machine::UserId;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Interpret one console line
pub fn parse_line(user: UserId, line: &str) -> Option<Inbound> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let inbound = match line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
        Some(payload) => Inbound::Button {
            user,
            payload: payload.to_string(),
        },
        None => Inbound::Text {
            user,
            text: line.to_string(),
        },
    };
    Some(inbound)
}

/// Render an outbound intent for the terminal
pub fn render(outbound: &Outbound) -> String {
    match outbound {
        Outbound::Text { text, .. } => format!("{text}\n"),
        Outbound::Prompt { text, choices, .. } => {
            let buttons: Vec<String> = choices.iter().map(|c| format!("[{c}]")).collect();
            format!("{text}\n  {}\n", buttons.join(" "))
        }
    }
}

/// Feed lines into the engine one at a time until EOF or cancellation
pub async fn read_inbound<S, P, R>(
    engine: &ConversationEngine<S, P>,
    user: UserId,
    input: R,
    cancel: CancellationToken,
) -> io::Result<()>
where
    S: PreferenceStore,
    P: ListingProvider,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = tokio::select! {
            () = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        if let Some(inbound) = parse_line(user, &line) {
            engine.dispatch(inbound).await;
        }
    }
    tracing::info!("Console input closed");
    Ok(())
}

/// Write every outbound intent until all senders are dropped
pub async fn write_outbound<W>(mut outbox: mpsc::Receiver<Outbound>, mut output: W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(outbound) = outbox.recv().await {
        output.write_all(render(&outbound).as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let user = UserId(3);
        assert_eq!(parse_line(user, "   "), None);
        assert_eq!(
            parse_line(user, "[Let's go!]"),
            Some(Inbound::Button {
                user,
                payload: "Let's go!".to_string()
            })
        );
        assert_eq!(
            parse_line(user, " 1200 - 1800 \n"),
            Some(Inbound::Text {
                user,
                text: "1200 - 1800".to_string()
            })
        );
    }

    #[test]
    fn test_render_prompt() {
        let prompt = Outbound::Prompt {
            user: UserId(1),
            text: "Pick one".to_string(),
            choices: vec!["Flat".to_string(), "House".to_string()],
        };
        assert_eq!(render(&prompt), "Pick one\n  [Flat] [House]\n");
    }

    #[tokio::test]
    async fn test_write_outbound_drains_until_closed() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Outbound::Text {
            user: UserId(1),
            text: "hello".to_string(),
        })
        .await
        .unwrap();
        drop(tx);

        let mut out = Vec::new();
        write_outbound(rx, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    }
}
