use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

/// Render the text a reader would see inside `element`: scripts and hidden
/// nodes are dropped, runs of whitespace collapse to one space and block
/// elements sit on their own lines.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
    let mut ctx = TextContext::default();
    visit_element(element, &mut ctx);
    ctx.into_text()
}

fn visit_node(node: NodeRef<'_, Node>, ctx: &mut TextContext) {
    match node.value() {
        Node::Text(text) => ctx.append_text(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, ctx);
            }
        }
        _ => {}
    }
}

fn visit_element(element: ElementRef<'_>, ctx: &mut TextContext) {
    let value = element.value();
    if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
        return;
    }
    match value.name() {
        "script" | "style" | "noscript" | "template" | "head" | "iframe" => {}
        "br" => ctx.ensure_newline(),
        name if is_block(name) => {
            ctx.ensure_newline();
            visit_children(element, ctx);
            ctx.ensure_newline();
        }
        _ => visit_children(element, ctx),
    }
}

fn visit_children(element: ElementRef<'_>, ctx: &mut TextContext) {
    for child in element.children() {
        visit_node(child, ctx);
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "section"
            | "article"
            | "main"
            | "aside"
            | "header"
            | "footer"
            | "nav"
            | "figure"
            | "figcaption"
            | "table"
            | "tr"
            | "td"
            | "th"
            | "blockquote"
            | "address"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "pre"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "body"
    )
}

#[derive(Default)]
struct TextContext {
    builder: String,
    last_char: Option<char>,
}

impl TextContext {
    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if matches!(self.last_char, None | Some(' ') | Some('\n')) {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if matches!(self.last_char, None | Some('\n')) {
            return;
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.builder.push(ch);
        self.last_char = Some(ch);
    }

    fn into_text(self) -> String {
        self.builder
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
