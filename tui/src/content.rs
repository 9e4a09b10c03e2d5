//! Page content and layout.
//!
//! Builds every row of the scrollable page for a given width and reports the
//! resulting [`PageGeometry`]. Text is wrapped here, so one entry in
//! [`Page::lines`] is exactly one terminal row.

use std::iter;
use std::mem;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use orbit_core::ShortcutBinding;
use orbit_types::{PageGeometry, SectionId, SectionSpan};

use crate::contact::{ContactForm, Field};
use crate::theme::{Glyphs, Palette, styles};

const MAX_TEXT_WIDTH: usize = 76;
const SECTION_GAP: usize = 2;
const MESSAGE_MIN_ROWS: usize = 3;

struct Skill {
    name: &'static str,
    level: u8,
}

const SKILLS: [Skill; 6] = [
    Skill { name: "C++", level: 80 },
    Skill { name: "TypeScript", level: 90 },
    Skill { name: "Node.js", level: 85 },
    Skill { name: "Python", level: 90 },
    Skill { name: "AWS", level: 75 },
    Skill {
        name: "Frontend (HTML, CSS, JS)",
        level: 95,
    },
];

struct Project {
    title: &'static str,
    description: &'static str,
    metrics: [(&'static str, &'static str); 3],
    stack: &'static [&'static str],
}

const PROJECTS: [Project; 2] = [
    Project {
        title: "AI Nexus",
        description: "Multi-AI collaboration platform achieving 40% better output quality \
                      through ensemble voting. Processes 1000+ requests daily with <500ms \
                      response time.",
        metrics: [
            ("+40%", "Quality"),
            ("<500ms", "Response"),
            ("1000+", "Daily Requests"),
        ],
        stack: &["TypeScript", "Python", "Redis", "WebSockets"],
    },
    Project {
        title: "E-Commerce Platform",
        description: "Full-stack marketplace serving 1000+ products with Stripe integration, \
                      achieving 99.9% uptime and sub-2s load times across all pages.",
        metrics: [
            ("1000+", "Products"),
            ("99.9%", "Uptime"),
            ("<2s", "Load Time"),
        ],
        stack: &["React", "Node.js", "PostgreSQL", "Stripe"],
    },
];

const ABOUT: [&str; 2] = [
    "I am a full stack developer who likes owning a problem end to end: the data model, \
     the API, the interface and the deploy pipeline that ships it.",
    "Most of my time goes into making things faster and simpler. When a system is \
     quiet in production, I consider the job done.",
];

const HIGHLIGHTS: [(&str, &str); 5] = [
    ("10+", "Projects (and counting!)"),
    ("0", "Clients (yet!)"),
    ("English, German", "Foreign Languages"),
    ("Java, Python", "Programming Languages"),
    ("AI Master", "Can use AI to its limit"),
];

const SOCIAL: [&str; 3] = ["GitHub", "LinkedIn", "Email"];

/// Inputs for one page build.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub width: u16,
    pub viewport_height: u16,
    pub form: &'a ContactForm,
    pub focused_field: Option<Field>,
    pub bindings: &'a [ShortcutBinding],
    pub palette: &'a Palette,
    pub glyphs: &'a Glyphs,
}

/// The laid-out page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    lines: Vec<Line<'static>>,
    geometry: PageGeometry,
}

impl Page {
    #[must_use]
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }
}

#[must_use]
pub fn build_page(view: &PageView<'_>) -> Page {
    let mut builder = PageBuilder::new(view);
    builder.hero();
    builder.about();
    builder.skills();
    builder.projects();
    builder.contact();
    builder.footer();
    builder.finish()
}

struct PageBuilder<'a> {
    view: &'a PageView<'a>,
    lines: Vec<Line<'static>>,
    spans: Vec<SectionSpan>,
    text_width: usize,
    margin: String,
}

impl<'a> PageBuilder<'a> {
    fn new(view: &'a PageView<'a>) -> Self {
        let width = usize::from(view.width);
        let margin = if width >= 60 { 4 } else { 1 };
        let text_width = width.saturating_sub(margin * 2).clamp(1, MAX_TEXT_WIDTH);
        Self {
            view,
            lines: Vec::new(),
            spans: Vec::new(),
            text_width,
            margin: " ".repeat(margin),
        }
    }

    fn palette(&self) -> &'a Palette {
        self.view.palette
    }

    fn glyphs(&self) -> &'a Glyphs {
        self.view.glyphs
    }

    fn row(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    fn push(&mut self, spans: Vec<Span<'static>>) {
        let mut line = Vec::with_capacity(spans.len() + 1);
        line.push(Span::raw(self.margin.clone()));
        line.extend(spans);
        self.lines.push(Line::from(line));
    }

    fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.push(vec![Span::styled(text.into(), style)]);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn heading(&mut self, text: &str) {
        let palette = self.palette();
        self.push_styled(text.to_uppercase(), styles::heading(palette));
        let rule = self.glyphs().rule.repeat(self.text_width.min(24));
        self.push_styled(rule, Style::default().fg(palette.accent));
        self.blank();
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        for row in wrap_words(text, self.text_width) {
            self.push_styled(row, style);
        }
    }

    /// Close a section that started at `top`. The trailing gap belongs to
    /// the section.
    fn end_section(&mut self, id: SectionId, top: u16) {
        for _ in 0..SECTION_GAP {
            self.blank();
        }
        let height = self.row().saturating_sub(top);
        self.spans.push(SectionSpan { id, top, height });
    }

    fn hint(&self, digit_for: SectionId, text: &'static str) -> Vec<Span<'static>> {
        let palette = self.palette();
        let key = self
            .view
            .bindings
            .iter()
            .find(|b| b.section == digit_for)
            .map_or_else(String::new, |b| format!("[ Alt+{} ]", b.digit));
        vec![
            Span::styled(key, styles::key_highlight(palette)),
            Span::styled(format!(" {text}"), styles::body(palette)),
        ]
    }

    fn hero(&mut self) {
        let palette = self.palette();
        let top = self.row();
        let start = self.lines.len();

        self.push_styled("HELLO, WORLD. I AM A", styles::key_hint(palette));
        self.blank();
        self.push_styled(
            "FULL STACK DEVELOPER",
            styles::heading(palette).add_modifier(Modifier::UNDERLINED),
        );
        self.blank();
        self.paragraph(
            "I build fast, reliable software from the database up to the pixels, \
             and I enjoy the parts in between the most.",
            styles::body(palette),
        );
        self.blank();
        let mut hints = self.hint(SectionId::PROJECTS, "View projects");
        hints.push(Span::raw("    "));
        hints.extend(self.hint(SectionId::CONTACT, "Get in touch"));
        self.push(hints);

        let content = self.lines.len() - start;
        let viewport = usize::from(self.view.viewport_height);
        let pad_top = viewport.saturating_sub(content) / 2;
        let body = self.lines.split_off(start);
        self.lines.extend(iter::repeat_n(Line::default(), pad_top));
        self.lines.extend(body);

        let min_height = self.view.viewport_height.max(1);
        while self.row().saturating_sub(top) < min_height {
            self.blank();
        }
        let height = self.row().saturating_sub(top);
        self.spans.push(SectionSpan {
            id: SectionId::HOME,
            top,
            height,
        });
    }

    fn about(&mut self) {
        let palette = self.palette();
        let glyphs = self.glyphs();
        let top = self.row();
        self.heading("About Me");
        for (i, text) in ABOUT.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(text, styles::body(palette));
        }
        self.blank();
        self.push_styled("MY JOURNEY", styles::key_hint(palette));
        for (value, label) in HIGHLIGHTS {
            self.push(vec![
                Span::styled(format!("{} ", glyphs.bullet), Style::default().fg(palette.primary)),
                Span::styled(
                    format!("{value:<18}"),
                    Style::default()
                        .fg(palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(label, styles::body(palette)),
            ]);
        }
        self.end_section(SectionId::ABOUT, top);
    }

    fn skills(&mut self) {
        let palette = self.palette();
        let glyphs = self.glyphs();
        let top = self.row();
        self.heading("Skills and Expertise");

        let name_width = SKILLS.iter().map(|s| s.name.width()).max().unwrap_or(0);
        let bar_width = if self.text_width >= name_width + 28 { 20 } else { 10 };
        for skill in &SKILLS {
            let filled = usize::from(skill.level) * bar_width / 100;
            let name = if self.text_width >= name_width + bar_width + 6 {
                pad_to_width(skill.name, name_width + 2)
            } else {
                format!("{} ", skill.name)
            };
            self.push(vec![
                Span::styled(name, Style::default().fg(palette.text_primary)),
                Span::styled(
                    glyphs.bar_full.repeat(filled),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    glyphs.bar_empty.repeat(bar_width - filled),
                    Style::default().fg(palette.bg_border),
                ),
                Span::styled(format!(" {}%", skill.level), styles::key_hint(palette)),
            ]);
        }
        self.blank();
        self.push_styled("LOCKED IN MODE", styles::key_hint(palette));
        self.end_section(SectionId::SKILLS, top);
    }

    fn projects(&mut self) {
        let palette = self.palette();
        let glyphs = self.glyphs();
        let top = self.row();
        self.heading("Featured Projects");

        for (i, project) in PROJECTS.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.push(vec![
                Span::styled(
                    project.title,
                    Style::default()
                        .fg(palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", glyphs.link), Style::default().fg(palette.accent)),
            ]);
            self.paragraph(project.description, styles::body(palette));

            let mut metrics = Vec::new();
            for (value, label) in project.metrics {
                metrics.push(Span::styled(
                    value,
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ));
                metrics.push(Span::styled(format!(" {label}   "), styles::key_hint(palette)));
            }
            if spans_width(&metrics) <= self.text_width {
                self.push(metrics);
            } else {
                for pair in metrics.chunks(2) {
                    self.push(pair.to_vec());
                }
            }

            let stack = project
                .stack
                .join(&format!(" {} ", glyphs.bullet));
            self.paragraph(&format!("Stack: {stack}"), styles::key_hint(palette));
        }
        self.end_section(SectionId::PROJECTS, top);
    }

    fn contact(&mut self) {
        let palette = self.palette();
        let top = self.row();
        self.heading("Let's Build Something..");
        self.paragraph(
            "Have a project in mind or just want to say hi? Send a transmission.",
            styles::body(palette),
        );
        self.blank();

        for field in Field::ALL {
            self.form_field(field);
        }

        let typing = self.view.focused_field.is_some();
        let send_style = if typing {
            styles::nav_active(palette)
        } else {
            Style::default().fg(palette.accent)
        };
        self.push(vec![
            Span::styled(" SEND MESSAGE ", send_style),
            Span::styled("  Ctrl+S", styles::key_hint(palette)),
        ]);
        self.blank();
        let hint = if typing {
            "Tab next field   Shift+Tab previous   Esc leave form"
        } else {
            "Enter or i to start typing"
        };
        self.paragraph(hint, styles::key_hint(palette));
        self.end_section(SectionId::CONTACT, top);
    }

    fn form_field(&mut self, field: Field) {
        let palette = self.palette();
        let glyphs = self.glyphs();
        let focused = self.view.focused_field == Some(field);
        let error = self.view.form.error(field);
        let value = self.view.form.value(field);

        let label_style = if focused {
            styles::key_highlight(palette)
        } else {
            styles::key_hint(palette)
        };
        self.push_styled(field.label(), label_style);

        let inner = self.text_width.saturating_sub(2).max(1);
        let mut rows = if value.is_empty() {
            Vec::new()
        } else {
            wrap_graphemes(value, inner)
        };
        if focused {
            let full = rows.last().is_none_or(|last| last.width() >= inner);
            match rows.last_mut() {
                Some(last) if !full => last.push_str(glyphs.cursor),
                _ => rows.push(glyphs.cursor.to_string()),
            }
        }
        let placeholder = rows.is_empty();
        if placeholder {
            rows.push(field.placeholder().to_string());
        }
        let min_rows = if field == Field::Message {
            MESSAGE_MIN_ROWS
        } else {
            1
        };
        while rows.len() < min_rows {
            rows.push(String::new());
        }

        let value_style = if placeholder {
            Style::default().fg(palette.text_muted)
        } else {
            Style::default().fg(palette.text_primary)
        };
        for (i, row) in rows.into_iter().enumerate() {
            let prefix = if focused && i == 0 {
                format!("{} ", glyphs.active)
            } else {
                "  ".to_string()
            };
            self.push(vec![
                Span::styled(prefix, Style::default().fg(palette.accent)),
                Span::styled(row, value_style),
            ]);
        }

        let rule_color = match (error, focused) {
            (Some(_), _) => palette.error,
            (None, true) => palette.accent,
            (None, false) => palette.bg_border,
        };
        let rule = glyphs.rule.repeat(self.text_width);
        self.push_styled(rule, Style::default().fg(rule_color));
        if let Some(error) = error {
            self.push_styled(format!("! {error}"), styles::field_error(palette));
        }
        self.blank();
    }

    fn footer(&mut self) {
        let palette = self.palette();
        let glyphs = self.glyphs();
        let rule = glyphs.rule.repeat(self.text_width);
        self.push_styled(rule, Style::default().fg(palette.bg_border));
        self.push_styled("ORBIT", styles::heading(palette));
        self.blank();

        let mut links = Vec::new();
        for binding in self.view.bindings {
            links.push(Span::styled(
                binding.digit.to_string(),
                styles::key_highlight(palette),
            ));
            links.push(Span::styled(
                format!(" {}  ", binding.section.label()),
                styles::body(palette),
            ));
        }
        if spans_width(&links) <= self.text_width {
            self.push(links);
        } else {
            for pair in links.chunks(2) {
                self.push(pair.to_vec());
            }
        }

        let social = SOCIAL
            .iter()
            .map(|name| format!("{name} {}", glyphs.link))
            .collect::<Vec<_>>()
            .join("   ");
        self.paragraph(&social, styles::key_hint(palette));
        self.blank();
        self.paragraph(
            "Built for the terminal, one frame at a time.",
            styles::key_hint(palette),
        );
    }

    fn finish(self) -> Page {
        let content_height = self.row();
        Page {
            geometry: PageGeometry::new(self.spans, content_height),
            lines: self.lines,
        }
    }
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(Span::width).sum()
}

fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

/// Word-wrap `text` to `width` columns. Words wider than a row are split at
/// grapheme boundaries.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if word_width > width {
            if !current.is_empty() {
                rows.push(mem::take(&mut current));
            }
            let mut pieces = wrap_graphemes(word, width);
            let last = pieces.pop().unwrap_or_default();
            rows.extend(pieces);
            current_width = last.width();
            current = last;
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width {
            rows.push(mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Hard-wrap at grapheme boundaries, keeping whitespace as typed.
pub(crate) fn wrap_graphemes(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if current_width + w > width && !current.is_empty() {
            rows.push(mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(grapheme);
        current_width += w;
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
