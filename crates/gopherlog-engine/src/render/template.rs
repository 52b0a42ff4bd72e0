//! A small section/placeholder template language for month pages.
//!
//! ```text
//! {{month}} {{year}}
//! {{#entries}}
//! {{begin}} {{end}}
//! {{body}}
//! {{#media}}{{.}} {{/media}}
//! {{/entries}}
//! {{#links}}
//! {{.}}
//! {{/links}}
//! {{^links}}
//! no links
//! {{/links}}
//! ```
//!
//! - `{{name}}` prints a text field of the innermost scope that has it.
//! - `{{#name}}…{{/name}}` repeats for every item of a list, or renders once
//!   for non-empty text.
//! - `{{^name}}…{{/name}}` renders only when `name` is empty.
//! - `{{.}}` is the current item inside a list of strings.
//!
//! A section tag alone on its line also swallows that line's newline.

use super::{RenderError, Renderer};
use crate::markup::cursor::Cursor;
use crate::page::{OutputEntry, Page};
use std::mem;
use std::path::Path;

/// Template bundled with the crate, used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/month.gph");

struct Tag;

impl Tag {
    const OPEN: &'static [u8; 2] = b"{{";
    const CLOSE: &'static [u8; 2] = b"}}";
    const SECTION: char = '#';
    const INVERTED: char = '^';
    const END: char = '/';
    const ITEM: &'static str = ".";
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

struct OpenSection {
    name: String,
    inverted: bool,
    outer: Vec<Node>,
}

impl Template {
    pub fn parse(src: &str) -> Result<Self, RenderError> {
        let mut cur = Cursor::new(src);
        let mut nodes = Vec::new();
        let mut open: Vec<OpenSection> = Vec::new();

        loop {
            let text_start = cur.pos();
            let Some(tag_start) = cur.seek(Tag::OPEN) else {
                push_text(&mut nodes, cur.slice_from(text_start));
                break;
            };
            push_text(&mut nodes, cur.slice_from(text_start));

            cur.bump_n(Tag::OPEN.len());
            let inner_start = cur.pos();
            if cur.seek(Tag::CLOSE).is_none() {
                return Err(RenderError::Template(format!(
                    "unclosed tag at byte {tag_start}"
                )));
            }
            let tag = cur.slice_from(inner_start).trim();
            cur.bump_n(Tag::CLOSE.len());

            let line_start = tag_start == 0 || src.as_bytes()[tag_start - 1] == b'\n';
            let mut standalone = false;

            if let Some(name) = tag.strip_prefix(Tag::SECTION) {
                open.push(OpenSection {
                    name: section_name(name, tag_start)?,
                    inverted: false,
                    outer: mem::take(&mut nodes),
                });
                standalone = true;
            } else if let Some(name) = tag.strip_prefix(Tag::INVERTED) {
                open.push(OpenSection {
                    name: section_name(name, tag_start)?,
                    inverted: true,
                    outer: mem::take(&mut nodes),
                });
                standalone = true;
            } else if let Some(name) = tag.strip_prefix(Tag::END) {
                let name = name.trim();
                let section = open.pop().ok_or_else(|| {
                    RenderError::Template(format!("unexpected {{{{/{name}}}}}"))
                })?;
                if section.name != name {
                    return Err(RenderError::Template(format!(
                        "section `{}` closed by `{name}`",
                        section.name
                    )));
                }
                let children = mem::replace(&mut nodes, section.outer);
                nodes.push(Node::Section {
                    name: section.name,
                    inverted: section.inverted,
                    children,
                });
                standalone = true;
            } else if tag.is_empty() {
                return Err(RenderError::Template(format!(
                    "empty tag at byte {tag_start}"
                )));
            } else {
                nodes.push(Node::Var(tag.to_string()));
            }

            if standalone && line_start && cur.peek() == Some(b'\n') {
                cur.bump();
            }
        }

        if let Some(section) = open.pop() {
            return Err(RenderError::Template(format!(
                "section `{}` is never closed",
                section.name
            )));
        }

        Ok(Self { nodes })
    }

    pub fn render(&self, page: &Page) -> Result<String, RenderError> {
        let mut out = String::new();
        let mut scopes = vec![Scope::Page(page)];
        render_nodes(&self.nodes, &mut scopes, &mut out)?;
        Ok(out)
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

fn section_name(name: &str, at: usize) -> Result<String, RenderError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RenderError::Template(format!(
            "section without a name at byte {at}"
        )));
    }
    Ok(name.to_string())
}

#[derive(Clone, Copy)]
enum Scope<'a> {
    Page(&'a Page),
    Entry(&'a OutputEntry),
    Item(&'a str),
}

#[derive(Clone, Copy)]
enum Value<'a> {
    Text(&'a str),
    Entries(&'a [OutputEntry]),
    Items(&'a [String]),
}

impl<'a> Scope<'a> {
    fn lookup(self, name: &str) -> Option<Value<'a>> {
        match self {
            Scope::Page(page) => match name {
                "year" => Some(Value::Text(&page.year)),
                "month" => Some(Value::Text(&page.month)),
                "entries" => Some(Value::Entries(&page.entries)),
                "links" => Some(Value::Items(&page.links)),
                "media_links" => Some(Value::Items(&page.media_links)),
                _ => None,
            },
            Scope::Entry(entry) => match name {
                "begin" => Some(Value::Text(&entry.begin)),
                "end" => Some(Value::Text(&entry.end)),
                "topic" => Some(Value::Text(&entry.topic)),
                "appendix" => Some(Value::Text(&entry.appendix)),
                "body" => Some(Value::Text(&entry.body)),
                "media" => Some(Value::Items(&entry.media)),
                _ => None,
            },
            Scope::Item(item) if name == Tag::ITEM => Some(Value::Text(item)),
            Scope::Item(_) => None,
        }
    }
}

impl Value<'_> {
    fn is_empty(self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Entries(entries) => entries.is_empty(),
            Value::Items(items) => items.is_empty(),
        }
    }
}

fn lookup<'a>(scopes: &[Scope<'a>], name: &str) -> Result<Value<'a>, RenderError> {
    scopes
        .iter()
        .rev()
        .find_map(|scope| scope.lookup(name))
        .ok_or_else(|| RenderError::Template(format!("unknown placeholder `{name}`")))
}

fn render_nodes<'a>(
    nodes: &[Node],
    scopes: &mut Vec<Scope<'a>>,
    out: &mut String,
) -> Result<(), RenderError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(name) => match lookup(scopes, name)? {
                Value::Text(text) => out.push_str(text),
                Value::Entries(_) | Value::Items(_) => {
                    return Err(RenderError::Template(format!(
                        "`{name}` is a list, use {{{{#{name}}}}}"
                    )));
                }
            },
            Node::Section {
                name,
                inverted: true,
                children,
            } => {
                if lookup(scopes, name)?.is_empty() {
                    render_nodes(children, scopes, out)?;
                }
            }
            Node::Section {
                name,
                inverted: false,
                children,
            } => match lookup(scopes, name)? {
                Value::Text(text) => {
                    if !text.is_empty() {
                        render_nodes(children, scopes, out)?;
                    }
                }
                Value::Entries(entries) => {
                    for entry in entries {
                        scopes.push(Scope::Entry(entry));
                        let result = render_nodes(children, scopes, out);
                        scopes.pop();
                        result?;
                    }
                }
                Value::Items(items) => {
                    for item in items {
                        scopes.push(Scope::Item(item));
                        let result = render_nodes(children, scopes, out);
                        scopes.pop();
                        result?;
                    }
                }
            },
        }
    }
    Ok(())
}

/// Renders pages through a [`Template`] loaded once per run.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: Template,
}

impl TemplateRenderer {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let src = std::fs::read_to_string(path).map_err(|source| RenderError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(Template::parse(&src)?))
    }

    /// Renderer using [`DEFAULT_TEMPLATE`].
    pub fn bundled() -> Result<Self, RenderError> {
        Ok(Self::new(Template::parse(DEFAULT_TEMPLATE)?))
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, page: &Page) -> Result<String, RenderError> {
        self.template.render(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MonthKey;
    use pretty_assertions::assert_eq;

    fn sample_page() -> Page {
        let mut page = Page::new(MonthKey {
            year: 2023,
            month: 12,
        });
        page.entries = vec![
            OutputEntry {
                begin: "Friday, 1. December 2023".into(),
                end: String::new(),
                topic: "Cleanup".into(),
                appendix: String::new(),
                media: vec!["[BILD 1]".into()],
                body: "We cleaned [fridge][LINK:1].".into(),
            },
            OutputEntry {
                begin: "Saturday, 2. December 2023".into(),
                end: "bis Sunday, 3. December 2023".into(),
                topic: "Hackathon".into(),
                appendix: "Slides online".into(),
                media: vec![],
                body: "Long weekend.".into(),
            },
        ];
        page.links = vec!["[h|[LINK 1]: fridge|URL:x|host|70]".into()];
        page.media_links = vec!["[h|[BILD 1]|URL:y|host|70]".into()];
        page
    }

    fn render(src: &str, page: &Page) -> String {
        Template::parse(src).unwrap().render(page).unwrap()
    }

    #[test]
    fn page_fields() {
        assert_eq!(render("{{month}} {{ year }}", &sample_page()), "12-December 2023");
    }

    #[test]
    fn entries_section_repeats() {
        let out = render("{{#entries}}<{{topic}}>{{/entries}}", &sample_page());
        assert_eq!(out, "<Cleanup><Hackathon>");
    }

    #[test]
    fn nested_item_lists() {
        let out = render(
            "{{#entries}}{{topic}}:{{#media}} {{.}}{{/media}};{{/entries}}",
            &sample_page(),
        );
        assert_eq!(out, "Cleanup: [BILD 1];Hackathon:;");
    }

    #[test]
    fn outer_scope_visible_inside_section() {
        let out = render("{{#entries}}{{year}}/{{topic}} {{/entries}}", &sample_page());
        assert_eq!(out, "2023/Cleanup 2023/Hackathon ");
    }

    #[test]
    fn text_sections_are_conditional() {
        let out = render(
            "{{#entries}}{{#end}}({{end}}){{/end}}{{^appendix}}-{{/appendix}}|{{/entries}}",
            &sample_page(),
        );
        assert_eq!(out, "-|(bis Sunday, 3. December 2023)|");
    }

    #[test]
    fn inverted_list_section() {
        let empty = Page::new(MonthKey {
            year: 2024,
            month: 1,
        });
        assert_eq!(render("{{^links}}none{{/links}}", &empty), "none");
        assert_eq!(render("{{^links}}none{{/links}}", &sample_page()), "");
    }

    #[test]
    fn standalone_section_lines_leave_no_blank_lines() {
        let out = render("Links:\n{{#links}}\n{{.}}\n{{/links}}\nend\n", &sample_page());
        assert_eq!(out, "Links:\n[h|[LINK 1]: fridge|URL:x|host|70]\nend\n");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let template = Template::parse("{{author}}").unwrap();
        let err = template.render(&sample_page()).unwrap_err();
        assert!(err.to_string().contains("unknown placeholder `author`"));
    }

    #[test]
    fn list_as_placeholder_is_an_error() {
        let template = Template::parse("{{links}}").unwrap();
        assert!(matches!(
            template.render(&sample_page()),
            Err(RenderError::Template(_))
        ));
    }

    #[test]
    fn item_outside_list_is_unknown() {
        let template = Template::parse("{{.}}").unwrap();
        assert!(template.render(&sample_page()).is_err());
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for src in [
            "{{#entries}}never closed",
            "{{/entries}}",
            "{{#entries}}{{/links}}",
            "{{unterminated",
            "{{}}",
            "{{#}}{{/}}",
        ] {
            assert!(
                matches!(Template::parse(src), Err(RenderError::Template(_))),
                "expected error for {src:?}"
            );
        }
    }

    #[test]
    fn bundled_template_renders() {
        let renderer = TemplateRenderer::bundled().unwrap();
        let out = renderer.render(&sample_page()).unwrap();
        assert!(out.contains("12-December 2023"));
        assert!(out.contains("We cleaned [fridge][LINK:1]."));
        assert!(out.contains("[h|[BILD 1]|URL:y|host|70]"));
    }

    #[test]
    fn from_path_missing_file() {
        let result = TemplateRenderer::from_path(Path::new("/no/such/template.gph"));
        assert!(matches!(result, Err(RenderError::TemplateRead { .. })));
    }
}
