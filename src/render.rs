//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows for
//! different output styles.  The default implementation draws replies in a
//! bordered panel with light markdown styling and prints usage as a table,
//! using ANSI escape codes unless color is disabled.

use std::io::{self, Stdout, Write};

use pulldown_cmark::{Event, Parser, Tag};
use textwrap::{Options, WordSeparator, WrapAlgorithm};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::chat::UsageReport;
use crate::cost::format_usd;
use crate::types::Model;

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for code blocks and notes).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for the pricing note).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for green text (busy indicator, current-turn column).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (session column and farewell).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for blue text (panel borders).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for magenta text (table headers).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// ANSI escape code for cyan text (inline code, metric names).
const ANSI_CYAN: &str = "\x1b[36m";

/// Clear the current terminal line and return to column zero.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Widest a reply panel's body is allowed to grow before lines wrap.
const MAX_PANEL_WIDTH: usize = 96;

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
pub trait Renderer: Send {
    /// Print the startup banner naming the active model.
    fn print_banner(&mut self, model: &Model);

    /// Show that a request is in flight.
    fn start_waiting(&mut self);

    /// Remove the in-flight indicator.
    fn finish_waiting(&mut self);

    /// Print a model reply under the given title.
    fn print_reply(&mut self, title: &str, text: &str);

    /// Print a turn's usage report.
    fn print_usage(&mut self, report: &UsageReport);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print the closing line with the session's total cost.
    fn print_farewell(&mut self, total_cost: f64);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    waiting: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            waiting: false,
        }
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, codes: &str, text: &str) -> String {
        if self.use_color {
            format!("{codes}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    // Terminal writes are best-effort; a closed stdout must not end the session.
    fn emit(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    fn clear_waiting(&mut self) {
        if self.waiting {
            if self.use_color {
                self.emit(ANSI_CLEAR_LINE);
            }
            self.waiting = false;
        }
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_banner(&mut self, model: &Model) {
        let name = format!("{} CLI", model.display_name());
        let body = [
            Line::styled(&name, Style::BOLD),
            Line::styled(&format!("Model: {}", model.id()), Style::DIM),
            Line::plain("Type 'exit' to quit."),
        ];
        let panel = draw_panel(None, &body, self.use_color);
        self.emit(&panel);
    }

    fn start_waiting(&mut self) {
        let text = self.paint(&format!("{ANSI_BOLD}{ANSI_GREEN}"), "Thinking...");
        if self.use_color {
            self.emit(&text);
        } else {
            self.emit(&format!("{text}\n"));
        }
        self.waiting = true;
    }

    fn finish_waiting(&mut self) {
        self.clear_waiting();
    }

    fn print_reply(&mut self, title: &str, text: &str) {
        self.clear_waiting();
        let body = format_markdown(text);
        let panel = draw_panel(Some(title), &body, self.use_color);
        self.emit(&panel);
    }

    fn print_usage(&mut self, report: &UsageReport) {
        self.clear_waiting();
        let table = format_usage_table(report, self.use_color);
        let note = self.paint(&format!("{ANSI_DIM}{ANSI_ITALIC}"), &report.pricing_note());
        self.emit(&format!("{table}{note}\n\n"));
    }

    fn print_error(&mut self, error: &str) {
        self.clear_waiting();
        let label = self.paint(&format!("{ANSI_BOLD}{ANSI_RED}"), "Error:");
        self.emit(&format!("{label} {error}\n"));
    }

    fn print_farewell(&mut self, total_cost: f64) {
        self.clear_waiting();
        let text = format!("Session ended. Total cost: {}", format_usd(total_cost));
        let text = self.paint(&format!("{ANSI_BOLD}{ANSI_YELLOW}"), &text);
        self.emit(&format!("{text}\n"));
    }
}

///////////////////////////////////////// Markdown ////////////////////////////////////////

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    italic: bool,
    code: bool,
    dim: bool,
}

impl Style {
    const BOLD: Style = Style {
        bold: true,
        italic: false,
        code: false,
        dim: false,
    };
    const DIM: Style = Style {
        bold: false,
        italic: false,
        code: false,
        dim: true,
    };

    fn codes(self) -> String {
        let mut codes = String::new();
        if self.bold {
            codes.push_str(ANSI_BOLD);
        }
        if self.dim {
            codes.push_str(ANSI_DIM);
        }
        if self.italic {
            codes.push_str(ANSI_ITALIC);
        }
        if self.code {
            codes.push_str(ANSI_CYAN);
        }
        codes
    }
}

/// A line of styled characters.
#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    cells: Vec<(char, Style)>,
}

impl Line {
    fn plain(text: &str) -> Self {
        Self::styled(text, Style::default())
    }

    fn styled(text: &str, style: Style) -> Self {
        let mut line = Line::default();
        line.push_str(text, style);
        line
    }

    fn push_str(&mut self, text: &str, style: Style) {
        for c in text.chars() {
            if c == '\t' {
                self.cells.extend(std::iter::repeat_n((' ', style), 4));
            } else {
                self.cells.push((c, style));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Terminal columns occupied; wide characters count twice.
    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|(c, _)| c.width().unwrap_or(0))
            .sum()
    }

    fn text(&self) -> String {
        self.cells.iter().map(|(c, _)| c).collect()
    }

    fn paint(&self, use_color: bool) -> String {
        if !use_color {
            return self.text();
        }
        let mut out = String::new();
        let mut current = Style::default();
        for &(c, style) in &self.cells {
            if style != current {
                if current != Style::default() {
                    out.push_str(ANSI_RESET);
                }
                out.push_str(&style.codes());
                current = style;
            }
            out.push(c);
        }
        if current != Style::default() {
            out.push_str(ANSI_RESET);
        }
        out
    }

    /// Split into lines no wider than `width` columns.
    ///
    /// textwrap decides the breaks on the plain text; styles are carried over by walking
    /// the original cells, skipping the whitespace textwrap dropped at each break.
    fn wrap(&self, width: usize) -> Vec<Line> {
        let text = self.text();
        let options = Options::new(width.max(1))
            .word_separator(WordSeparator::UnicodeBreakProperties)
            .wrap_algorithm(WrapAlgorithm::FirstFit);
        let mut cells = self.cells.iter().peekable();
        textwrap::wrap(&text, &options)
            .iter()
            .map(|row| {
                let mut line = Line::default();
                for c in row.chars() {
                    while let Some((src, _)) = cells.peek() {
                        if *src != c && src.is_whitespace() {
                            cells.next();
                        } else {
                            break;
                        }
                    }
                    let style = cells.next().map(|(_, s)| *s).unwrap_or_default();
                    line.cells.push((c, style));
                }
                line
            })
            .collect()
    }
}

/// Builds display lines from pulldown-cmark events.
#[derive(Default)]
struct MarkdownLines {
    lines: Vec<Line>,
    current: Line,
    bold: usize,
    italic: usize,
    quote: usize,
    heading: bool,
    code_block: bool,
    // One entry per open list: the next ordinal for ordered lists.
    lists: Vec<Option<u64>>,
}

impl MarkdownLines {
    fn style(&self) -> Style {
        Style {
            bold: self.heading || self.bold > 0,
            italic: self.italic > 0,
            code: false,
            dim: self.quote > 0,
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    /// Finish the current line and leave one blank line before the next block.
    fn separate(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if self.current.is_empty() && self.quote > 0 {
            self.current.push_str(&"│ ".repeat(self.quote), Style::DIM);
        }
        self.current.push_str(text, style);
    }

    fn push_code(&mut self, text: &str) {
        let indent = "  ".repeat(self.lists.len() + 1);
        for raw in text.lines() {
            let mut line = Line::plain(&indent);
            line.push_str(raw, Style::DIM);
            self.lines.push(line);
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.separate();
                }
            }
            Tag::Heading(..) => {
                self.separate();
                self.heading = true;
            }
            Tag::BlockQuote => {
                self.separate();
                self.quote += 1;
            }
            Tag::CodeBlock(_) => {
                if self.lists.is_empty() {
                    self.separate();
                } else {
                    self.flush();
                }
                self.code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.separate();
                } else {
                    self.flush();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.push_text(&format!("{indent}{marker}"), Style::default());
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph | Tag::Item => self.flush(),
            Tag::Heading(..) => {
                self.flush();
                self.heading = false;
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote = self.quote.saturating_sub(1);
            }
            Tag::CodeBlock(_) => self.code_block = false,
            Tag::List(_) => {
                self.flush();
                self.lists.pop();
            }
            Tag::Emphasis => self.italic = self.italic.saturating_sub(1),
            Tag::Strong => self.bold = self.bold.saturating_sub(1),
            _ => {}
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.code_block => self.push_code(&text),
            Event::Text(text) => self.push_text(&text, self.style()),
            Event::Code(code) => {
                let style = Style {
                    code: true,
                    ..self.style()
                };
                self.push_text(&code, style);
            }
            Event::Html(html) => self.push_text(html.trim_end(), self.style()),
            Event::SoftBreak => self.push_text(" ", self.style()),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.separate();
                self.lines.push(Line::styled("───", Style::DIM));
            }
            _ => {}
        }
    }
}

/// Convert markdown reply text into styled display lines.
fn format_markdown(text: &str) -> Vec<Line> {
    let mut builder = MarkdownLines::default();
    for event in Parser::new(text) {
        builder.event(event);
    }
    builder.flush();
    builder.lines
}

/// Pad `text` with spaces to `width` terminal columns.
fn pad(text: &str, width: usize, align_right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if align_right {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

/// Draw `body` inside a rounded box, wrapping lines wider than the panel.
fn draw_panel(title: Option<&str>, body: &[Line], use_color: bool) -> String {
    let title_width = title.map(|t| t.width() + 2).unwrap_or(0);
    let widest = body.iter().map(Line::width).max().unwrap_or(0);
    let width = widest.min(MAX_PANEL_WIDTH).max(title_width);

    let border = |s: &str| {
        if use_color {
            format!("{ANSI_BLUE}{s}{ANSI_RESET}")
        } else {
            s.to_string()
        }
    };

    let mut out = String::new();
    match title {
        Some(title) => {
            let fill = "─".repeat(width - title_width);
            let title = if use_color {
                format!("{ANSI_BOLD}{title}{ANSI_RESET}")
            } else {
                title.to_string()
            };
            out.push_str(&border("╭─"));
            out.push_str(&format!(" {title} "));
            out.push_str(&border(&format!("{fill}─╮")));
        }
        None => out.push_str(&border(&format!("╭{}╮", "─".repeat(width + 2)))),
    }
    out.push('\n');
    for line in body {
        for wrapped in line.wrap(width) {
            let fill = " ".repeat(width.saturating_sub(wrapped.width()));
            out.push_str(&border("│"));
            out.push_str(&format!(" {}{fill} ", wrapped.paint(use_color)));
            out.push_str(&border("│"));
            out.push('\n');
        }
    }
    out.push_str(&border(&format!("╰{}╯", "─".repeat(width + 2))));
    out.push('\n');
    out
}

/// Draw a usage report as a three-column table.
pub fn format_usage_table(report: &UsageReport, use_color: bool) -> String {
    let header = ["Metric", "Current Turn", "Session Total"];
    let rows = report.rows();
    let mut widths = header.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }
    let paint = |codes: &str, text: String| {
        if use_color {
            format!("{codes}{text}{ANSI_RESET}")
        } else {
            text
        }
    };
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };

    let total_width: usize = widths.iter().sum::<usize>() + 3 * widths.len() + 1;
    let title = report.title();
    let title_pad = total_width.saturating_sub(title.width()) / 2;

    let mut out = String::new();
    out.push_str(&" ".repeat(title_pad));
    out.push_str(&paint(ANSI_ITALIC, title));
    out.push('\n');
    out.push_str(&rule("┌", "┬", "┐"));
    out.push('│');
    for (h, w) in header.iter().zip(widths.iter()) {
        let cell = pad(h, *w, false);
        out.push_str(&format!(" {} │", paint(&format!("{ANSI_BOLD}{ANSI_MAGENTA}"), cell)));
    }
    out.push('\n');
    out.push_str(&rule("├", "┼", "┤"));
    let last = rows.len().saturating_sub(1);
    for (idx, row) in rows.iter().enumerate() {
        let bold = if idx == last { ANSI_BOLD } else { "" };
        let cells = [
            paint(&format!("{bold}{ANSI_CYAN}"), pad(&row[0], widths[0], false)),
            paint(&format!("{bold}{ANSI_GREEN}"), pad(&row[1], widths[1], true)),
            paint(&format!("{bold}{ANSI_YELLOW}"), pad(&row[2], widths[2], true)),
        ];
        out.push('│');
        for cell in cells {
            out.push_str(&format!(" {cell} │"));
        }
        out.push('\n');
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{PricingTier, SessionCost};
    use crate::types::{KnownModel, UsageMetadata};

    fn output(renderer: PlainTextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn banner_names_model_and_exit() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_banner(&Model::Known(KnownModel::Gemini3ProPreview));
        let out = output(renderer);
        assert!(out.contains("│ Gemini 3 Pro CLI"));
        assert!(out.contains("Model: gemini-3-pro-preview"));
        assert!(out.contains("Type 'exit' to quit."));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn reply_panel_plain() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_reply("Gemini 3 Pro", "Hi!");
        let expected = format!(
            "╭─ Gemini 3 Pro ─╮\n│ Hi!{} │\n╰{}╯\n",
            " ".repeat(11),
            "─".repeat(16)
        );
        assert_eq!(output(renderer), expected);
    }

    #[test]
    fn markdown_styles_are_stripped_without_color() {
        let lines = format_markdown(
            "# Title\n\nSome **bold** and `code`.\n- item\n```rust\nlet x = 1;\n```",
        );
        let text: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(
            text,
            vec![
                "Title",
                "",
                "Some bold and code.",
                "",
                "• item",
                "",
                "  let x = 1;",
            ]
        );
        assert!(lines[0].cells.iter().all(|(_, s)| s.bold));
        assert!(lines[6].cells[2..].iter().all(|(_, s)| s.dim));
    }

    #[test]
    fn unmatched_markers_are_literal() {
        let text = |md: &str| -> Vec<String> {
            format_markdown(md).iter().map(Line::text).collect()
        };
        assert_eq!(text("2 ** 3"), vec!["2 ** 3"]);
        assert_eq!(text("a ` b"), vec!["a ` b"]);
        assert_eq!(text("#hashtag"), vec!["#hashtag"]);
    }

    #[test]
    fn inline_styles_mark_cells() {
        let lines = format_markdown("a **b** *i* `c`");
        let line = &lines[0];
        assert_eq!(line.text(), "a b i c");
        assert!(!line.cells[0].1.bold);
        assert!(line.cells[2].1.bold);
        assert!(!line.cells[3].1.bold);
        assert!(line.cells[4].1.italic);
        assert!(line.cells[6].1.code);
        assert!(line.paint(true).contains(ANSI_CYAN));
    }

    #[test]
    fn ordered_and_nested_lists() {
        let lines = format_markdown("1. one\n2. two\n   - inner");
        let text: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(text, vec!["1. one", "2. two", "  • inner"]);
    }

    #[test]
    fn long_lines_wrap_at_spaces() {
        let line = Line::plain("alpha beta gamma");
        let wrapped: Vec<String> = line.wrap(10).iter().map(Line::text).collect();
        assert_eq!(wrapped, vec!["alpha beta", "gamma"]);

        let line = Line::plain("abcdefghijkl");
        let wrapped: Vec<String> = line.wrap(5).iter().map(Line::text).collect();
        assert_eq!(wrapped, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn wrapping_keeps_styles() {
        let lines = format_markdown("plain **strong words**");
        let wrapped = lines[0].wrap(12);
        assert_eq!(wrapped[0].text(), "plain strong");
        assert_eq!(wrapped[1].text(), "words");
        assert!(!wrapped[0].cells[0].1.bold);
        assert!(wrapped[0].cells[6].1.bold);
        assert!(wrapped[1].cells.iter().all(|(_, s)| s.bold));
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let line = Line::plain("你好世界");
        assert_eq!(line.width(), 8);
        let wrapped: Vec<String> = Line::plain("你好世界你好")
            .wrap(5)
            .iter()
            .map(Line::text)
            .collect();
        assert_eq!(wrapped, vec!["你好", "世界", "你好"]);
    }

    #[test]
    fn reply_panel_aligns_wide_characters() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_reply("Gemini 3 Pro", "ab\n\n你好世界");
        let out = output(renderer);
        let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
        assert_eq!(widths, vec![18; 5]);
        assert!(out.contains(&format!("│ 你好世界{} │", " ".repeat(6))));
    }

    #[test]
    fn usage_table_plain() {
        let pricing = PricingTier::Standard.pricing();
        let turn = pricing.turn_cost(&UsageMetadata::new(5, 2, 7));
        let mut session = SessionCost::new();
        session.record(&turn);
        let report = UsageReport::new(
            &Model::Known(KnownModel::Gemini3ProPreview),
            turn,
            &session,
            PricingTier::Standard,
        );
        let table = format_usage_table(&report, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0].trim(), "gemini-3-pro-preview Usage & Cost");
        assert_eq!(lines[2], "│ Metric          │ Current Turn │ Session Total │");
        assert_eq!(lines[4], "│ Input Tokens    │            5 │             - │");
        assert_eq!(lines[5], "│ Output Tokens   │            2 │             - │");
        assert_eq!(lines[6], "│ Total Tokens    │            7 │             - │");
        assert_eq!(lines[7], "│ Est. Cost (USD) │    $0.000034 │     $0.000034 │");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn usage_and_farewell_output() {
        let pricing = PricingTier::Standard.pricing();
        let turn = pricing.turn_cost(&UsageMetadata::new(50, 20, 70));
        let mut session = SessionCost::new();
        session.record(&turn);
        let report = UsageReport::new(
            &Model::Known(KnownModel::Gemini3ProPreview),
            turn,
            &session,
            PricingTier::Standard,
        );
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_usage(&report);
        renderer.print_farewell(session.total());
        let out = output(renderer);
        assert!(out.contains("Pricing tier based on <=200k context: $2/M in, $12/M out\n\n"));
        assert!(out.ends_with("Session ended. Total cost: $0.000340\n"));
    }

    #[test]
    fn waiting_indicator_is_cleared_before_reply() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), true);
        renderer.start_waiting();
        renderer.print_reply("Gemini", "ok");
        let out = output(renderer);
        let cleared = out.find(ANSI_CLEAR_LINE).unwrap();
        assert!(out[..cleared].contains("Thinking..."));
        assert!(out[cleared..].contains("ok"));
    }

    #[test]
    fn error_is_labelled() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_error("Timeout error: slow");
        assert_eq!(output(renderer), "Error: Timeout error: slow\n");
    }
}
