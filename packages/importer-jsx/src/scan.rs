//! Return-tree location.
//!
//! Tokenizes component-script source and finds the first `return` statement
//! whose argument opens an element or fragment, looking through any number of
//! wrapping parentheses. The element text itself is handed to the element
//! parser by byte offset; everything around it (hooks, handlers, imports) is
//! never evaluated.

use crate::error::{ScriptError, ScriptResult};
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token<'src> {
    #[token("return")]
    Return,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    #[regex(r"`([^`\\]|\\.)*`")]
    StringLit,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("<")]
    LAngle,

    // Everything else in the surrounding code is noise for our purposes.
    #[regex(r"[^A-Za-z_$ \t\r\n<()'`\x22]")]
    Other,
}

/// Byte offset where the returned element/fragment tree starts.
pub fn find_return_tree(source: &str) -> ScriptResult<usize> {
    let mut lexer = Token::lexer(source);
    let mut after_return = false;

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            // Unknown byte; irrelevant unless we are mid-return.
            after_return = false;
            continue;
        };

        match token {
            Token::Return => {
                after_return = true;
            }
            Token::LParen if after_return => {
                // return ( <div> ... : keep looking through the parens.
            }
            Token::LAngle if after_return => {
                return Ok(lexer.span().start);
            }
            _ => {
                after_return = false;
            }
        }
    }

    Err(ScriptError::NoReturnTree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_direct_return() {
        let src = "function App() { return <div>hi</div>; }";
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<div>"));
    }

    #[test]
    fn test_finds_parenthesized_return() {
        let src = "const App = () => {\n  return (\n    <section>ok</section>\n  );\n};";
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<section>"));
    }

    #[test]
    fn test_skips_non_element_returns() {
        let src = "function helper() { return 42; }\nfunction App() { return <p>x</p>; }";
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<p>"));
    }

    #[test]
    fn test_return_inside_string_ignored() {
        let src = r#"const label = "return <fake/>"; function App() { return <b>y</b>; }"#;
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<b>"));
    }

    #[test]
    fn test_return_inside_comment_ignored() {
        let src = "// return <nope/>\nfunction App() { return <i>z</i>; }";
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<i>"));
    }

    #[test]
    fn test_no_return_tree() {
        assert!(matches!(
            find_return_tree("const x = 1;"),
            Err(ScriptError::NoReturnTree)
        ));
        assert!(matches!(
            find_return_tree("function f() { return x + 1; }"),
            Err(ScriptError::NoReturnTree)
        ));
    }

    #[test]
    fn test_finds_fragment_return() {
        let src = "function App() { return (<><p>a</p><p>b</p></>); }";
        let start = find_return_tree(src).unwrap();
        assert!(src[start..].starts_with("<>"));
    }
}
