use super::lex;
use brack_ir::{Span, TokenKind};
use pretty_assertions::assert_eq;

/// Token kinds only, for shape assertions.
fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

fn function(name: &str) -> TokenKind {
    TokenKind::Function(name.to_string())
}

fn argument(text: &str) -> TokenKind {
    TokenKind::Argument(text.to_string())
}

#[test]
fn empty_input_produces_no_tokens() {
    assert_eq!(lex(""), vec![]);
}

#[test]
fn plain_text_is_one_token_per_char() {
    let tokens = lex("hi!");
    assert_eq!(
        tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
        vec![
            TokenKind::Text('h'),
            TokenKind::Text('i'),
            TokenKind::Text('!'),
        ]
    );
    assert_eq!(tokens[1].span, Span::new(1, 2));
}

#[test]
fn simple_call_token_sequence() {
    assert_eq!(
        kinds("[rand: a, b]"),
        vec![
            TokenKind::BlockStart,
            function("rand"),
            TokenKind::Indicator,
            argument("a"),
            TokenKind::Comma,
            argument("b"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn arguments_are_trimmed() {
    assert_eq!(
        kinds("[f:   spaced out  , b ]"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            argument("spaced out"),
            TokenKind::Comma,
            argument("b"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn empty_arguments_are_skipped() {
    // A comma with nothing before it emits no Argument token.
    assert_eq!(
        kinds("[f: , a]"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            TokenKind::Comma,
            argument("a"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn function_name_is_not_trimmed() {
    assert_eq!(
        kinds("[ f: x]"),
        vec![
            TokenKind::BlockStart,
            function(" f"),
            TokenKind::Indicator,
            argument("x"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn colon_inside_arguments_is_ordinary_text() {
    assert_eq!(
        kinds("[f: a:b]"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            argument("a:b"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn nested_call_interrupts_and_resumes_the_argument_buffer() {
    // Text around a nested group fuses into a single trailing argument.
    assert_eq!(
        kinds("[f: a[g: 1]b]"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            TokenKind::BlockStart,
            function("g"),
            TokenKind::Indicator,
            argument("1"),
            TokenKind::BlockEnd,
            argument("ab"),
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn sibling_nested_calls() {
    assert_eq!(
        kinds("[f: [g: 1], [h: 2]]"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            TokenKind::BlockStart,
            function("g"),
            TokenKind::Indicator,
            argument("1"),
            TokenKind::BlockEnd,
            TokenKind::Comma,
            TokenKind::BlockStart,
            function("h"),
            TokenKind::Indicator,
            argument("2"),
            TokenKind::BlockEnd,
            TokenKind::BlockEnd,
        ]
    );
}

#[test]
fn unmatched_close_bracket_still_emits_block_end() {
    assert_eq!(kinds("]"), vec![TokenKind::BlockEnd]);
    assert_eq!(
        kinds("a]"),
        vec![TokenKind::Text('a'), TokenKind::BlockEnd]
    );
}

#[test]
fn unterminated_name_emits_function_token() {
    assert_eq!(kinds("[foo"), vec![TokenKind::BlockStart, function("foo")]);
    // Degenerate: `[` at end of input yields an empty name.
    assert_eq!(kinds("x["), vec![TokenKind::Text('x'), TokenKind::BlockStart, function("")]);
}

#[test]
fn unterminated_arguments_flush_without_block_end() {
    assert_eq!(
        kinds("[f: a"),
        vec![
            TokenKind::BlockStart,
            function("f"),
            TokenKind::Indicator,
            argument("a"),
        ]
    );
}

#[test]
fn multibyte_text_gets_full_char_spans() {
    let tokens = lex("é!");
    assert_eq!(tokens[0].kind, TokenKind::Text('é'));
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(2, 3));
}

#[test]
fn function_and_indicator_spans() {
    let tokens = lex("[rand: x]");
    assert_eq!(tokens[1].kind, function("rand"));
    assert_eq!(tokens[1].span, Span::new(1, 5));
    assert_eq!(tokens[2].kind, TokenKind::Indicator);
    assert_eq!(tokens[2].span, Span::new(5, 6));
}

#[test]
fn whitespace_only_argument_is_dropped() {
    assert_eq!(
        kinds("[f:    ]"),
        vec![TokenKind::BlockStart, function("f"), TokenKind::Indicator, TokenKind::BlockEnd]
    );
}
