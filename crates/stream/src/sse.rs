//! Incremental server-sent-event framing
//!
//! The telemetry feed arrives as arbitrary byte chunks; a frame boundary is
//! a blank line and may fall anywhere inside or across chunks. [`FrameBuffer`]
//! accumulates chunks and yields complete frames as they close.

/// One complete SSE frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Value of the `event:` field, if the frame carried one
    pub event: Option<String>,
    /// Concatenated `data:` lines, joined with newlines
    pub data: String,
}

/// Accumulates stream chunks and splits them into complete frames.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: String,
}

impl FrameBuffer {
    /// Create an empty frame buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every frame completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<SseFrame> {
        self.buffer.push_str(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.find("\n\n") {
            let message = self.buffer[..pos].to_string();
            self.buffer = self.buffer[pos + 2..].to_string();
            if let Some(frame) = parse_frame(&message) {
                frames.push(frame);
            }
        }

        frames
    }
}

/// Parse one blank-line-delimited message into a frame.
///
/// Comment lines (`:` prefix) and `id:`/`retry:` fields are ignored.
/// Returns `None` for messages carrying neither an event type nor data.
fn parse_frame(message: &str) -> Option<SseFrame> {
    let mut event = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in message.lines() {
        let line = line.trim_end_matches('\r');
        if line.starts_with(':') {
            continue;
        }
        if let Some(value) = line.strip_prefix("event:") {
            event = Some(value.strip_prefix(' ').unwrap_or(value).to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    if event.is_none() && data_lines.is_empty() {
        return None;
    }

    Some(SseFrame {
        event,
        data: data_lines.join("\n"),
    })
}
