//! Terminal chat loop. Every line is answered on its own; the history is only for display.

use anyhow::Result;
use prompt::{format_transcript, ChatMessage};
use supply_agent::Answerer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "> ";

/// Displayed conversation.
#[derive(Debug, Default, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn push_turn(&mut self, question: &str, answer: &str) {
        self.messages.push(ChatMessage::user(question));
        self.messages.push(ChatMessage::assistant(answer));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn render(&self) -> String {
        format_transcript(&self.messages)
    }
}

/// Reads questions from `input` until EOF or `/quit`, writing answers to `output`.
pub async fn run_chat<A, R, W>(answerer: &A, input: R, mut output: W) -> Result<ChatHistory>
where
    A: Answerer + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut history = ChatHistory::default();
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        match question {
            "" => continue,
            "/quit" => break,
            "/history" => {
                output.write_all(history.render().as_bytes()).await?;
                continue;
            }
            _ => {}
        }

        let answer = answerer.answer(question).await;
        output.write_all(answer.as_bytes()).await?;
        output.write_all(b"\n").await?;
        history.push_turn(question, &answer);
    }

    output.flush().await?;
    Ok(history)
}
