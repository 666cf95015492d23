//! Turns filter trees back into canonical CQL2 text.
//!
//! Output parses back into the same tree under the CQL2 profile, except
//! case-insensitive `Like`, which is written as `ILIKE` and needs the
//! legacy ILIKE profile to read back.

pub mod expr;
pub mod filter;
pub mod value;

/// A node that can be written as CQL2 text.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the text while a tree is rendered.
#[derive(Debug, Default)]
pub struct Renderer {
    pub text: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.text
    }

    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Renders `items` separated by `separator`.
    pub fn list<T: Render>(&mut self, items: &[T], separator: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.text.push_str(separator);
            }
            item.render(self);
        }
    }

    /// Renders `node` inside parentheses.
    pub fn group<T: Render + ?Sized>(&mut self, node: &T) {
        self.text.push('(');
        node.render(self);
        self.text.push(')');
    }
}

/// Encodes a filter, expression or value as CQL2 text.
pub fn to_text<N: Render + ?Sized>(node: &N) -> String {
    let mut renderer = Renderer::new();
    node.render(&mut renderer);
    renderer.finish()
}
