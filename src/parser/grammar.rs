//! Descriptor grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::ParseError;

/// Lex `input`, feed it to `parser` and collect any errors
macro_rules! run_parser {
    ($input:expr, $parser:expr) => {{
        let input: &str = $input;
        let len = input.len();

        // Create a logos lexer and convert to token stream
        let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

        // Turn the token iterator into a stream that chumsky can use
        let token_stream = Stream::from_iter(token_iter)
            // Split (Token, SimpleSpan) into token and span parts
            .map((len..len).into(), |(t, s): (_, _)| (t, s));

        $parser
            .parse(token_stream)
            .into_result()
            .map_err(|errs| {
                errs.into_iter()
                    .map(|e| e.into())
                    .collect::<Vec<ParseError>>()
            })
    }};
}

/// Parse an anchor location such as `"bottom"` or `"top end"`
pub fn parse_anchor_spec(input: &str) -> Result<AnchorSpec, Vec<ParseError>> {
    run_parser!(input, anchor_parser().then_ignore(end()))
}

/// Parse an origin: `"auto"`, `"overlap"` or an anchor location
pub fn parse_origin_spec(input: &str) -> Result<OriginSpec, Vec<ParseError>> {
    run_parser!(input, origin_parser().then_ignore(end()))
}

/// Parse an offset: `"8"`, `"8 -4"` or `"8px, 4px"`
pub fn parse_offset(input: &str) -> Result<OffsetSpec, Vec<ParseError>> {
    run_parser!(input, offset_parser().then_ignore(end()))
}

/// Parse a pixel length such as `"300px"` or `"300"`
pub fn parse_length(input: &str) -> Result<f64, Vec<ParseError>> {
    run_parser!(input, length_parser().then_ignore(end()))
}

/// Parse a computed transform: `none`, `matrix(...)` or `matrix3d(...)`
pub fn parse_transform(input: &str) -> Result<TransformSpec, Vec<ParseError>> {
    run_parser!(input, transform_parser().then_ignore(end()))
}

/// Parse a computed transform origin: `"x y"` or `"x y z"` in pixels
///
/// A single value is used for both axes.
pub fn parse_transform_origin(input: &str) -> Result<OriginPoint, Vec<ParseError>> {
    run_parser!(input, transform_origin_parser().then_ignore(end()))
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn keyword_parser<'a, I>(
) -> impl Parser<'a, I, Spanned<AnchorKeyword>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    select! {
        Token::Top => AnchorKeyword::Top,
        Token::Bottom => AnchorKeyword::Bottom,
        Token::Left => AnchorKeyword::Left,
        Token::Right => AnchorKeyword::Right,
        Token::Center => AnchorKeyword::Center,
        Token::Start => AnchorKeyword::Start,
        Token::End => AnchorKeyword::End,
    }
    .map_with(|kw, e| Spanned::new(kw, span_range(&e.span())))
}

fn anchor_parser<'a, I>() -> impl Parser<'a, I, AnchorSpec, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    keyword_parser()
        .then(keyword_parser().or_not())
        .try_map(|(side, align), span: SimpleSpan| {
            if let Some(align) = &align {
                // Alignment must lie along the side's surface
                let same_axis = (side.node.is_block() && align.node.is_block())
                    || (side.node.is_inline() && align.node.is_inline());
                if same_axis {
                    return Err(Rich::custom(
                        span,
                        format!(
                            "'{}' cannot be aligned to '{}': both lie on the same axis",
                            side.node.as_str(),
                            align.node.as_str()
                        ),
                    ));
                }
            }
            Ok(AnchorSpec { side, align })
        })
}

fn origin_parser<'a, I>() -> impl Parser<'a, I, OriginSpec, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    choice((
        just(Token::Auto).to(OriginSpec::Auto),
        just(Token::Overlap).to(OriginSpec::Overlap),
        anchor_parser().map(OriginSpec::Anchor),
    ))
}

fn length_parser<'a, I>() -> impl Parser<'a, I, f64, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    choice((just(Token::Minus).to(-1.0), just(Token::Plus).to(1.0)))
        .or_not()
        .then(number)
        .then_ignore(just(Token::Px).or_not())
        .map(|(sign, n): (Option<f64>, f64)| sign.unwrap_or(1.0) * n)
}

fn offset_parser<'a, I>() -> impl Parser<'a, I, OffsetSpec, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    length_parser()
        .then(
            just(Token::Comma)
                .or_not()
                .ignore_then(length_parser())
                .or_not(),
        )
        .map(|(main, cross)| OffsetSpec { main, cross })
}

fn transform_parser<'a, I>() -> impl Parser<'a, I, TransformSpec, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let arguments = length_parser()
        .separated_by(just(Token::Comma))
        .collect::<Vec<_>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose));

    let matrix = just(Token::Matrix)
        .ignore_then(arguments.clone())
        .try_map(|values: Vec<f64>, span: SimpleSpan| {
            <[f64; 6]>::try_from(values)
                .map(TransformSpec::Matrix)
                .map_err(|values| {
                    Rich::custom(
                        span,
                        format!("matrix() takes 6 values, found {}", values.len()),
                    )
                })
        });

    let matrix3d = just(Token::Matrix3d)
        .ignore_then(arguments)
        .try_map(|values: Vec<f64>, span: SimpleSpan| {
            <[f64; 16]>::try_from(values)
                .map(TransformSpec::Matrix3d)
                .map_err(|values| {
                    Rich::custom(
                        span,
                        format!("matrix3d() takes 16 values, found {}", values.len()),
                    )
                })
        });

    choice((just(Token::NoTransform).to(TransformSpec::None), matrix, matrix3d))
}

fn transform_origin_parser<'a, I>(
) -> impl Parser<'a, I, OriginPoint, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    length_parser()
        .then(length_parser().or_not())
        // The z component has no effect on the 2D box
        .then_ignore(length_parser().or_not())
        .map(|(x, y)| OriginPoint {
            x,
            y: y.unwrap_or(x),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_side_only() {
        let spec = parse_anchor_spec("bottom").expect("should parse");
        assert_eq!(spec.side.node, AnchorKeyword::Bottom);
        assert!(spec.align.is_none());
    }

    #[test]
    fn test_parse_side_and_align() {
        let spec = parse_anchor_spec("top end").expect("should parse");
        assert_eq!(spec.side.node, AnchorKeyword::Top);
        assert_eq!(spec.align.map(|a| a.node), Some(AnchorKeyword::End));
    }

    #[test]
    fn test_anchor_spans() {
        let spec = parse_anchor_spec("left  bottom").expect("should parse");
        assert_eq!(spec.side.span, 0..4);
        assert_eq!(spec.align.map(|a| a.span), Some(6..12));
    }

    #[test]
    fn test_reject_same_axis_alignment() {
        let errors = parse_anchor_spec("top bottom").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("same axis"));
    }

    #[test]
    fn test_reject_unknown_keyword() {
        assert!(parse_anchor_spec("sideways").is_err());
        assert!(parse_anchor_spec("").is_err());
        assert!(parse_anchor_spec("top left right").is_err());
    }

    #[test]
    fn test_parse_origin_keywords() {
        assert_eq!(parse_origin_spec("auto").unwrap(), OriginSpec::Auto);
        assert_eq!(parse_origin_spec("overlap").unwrap(), OriginSpec::Overlap);
        match parse_origin_spec("top start").unwrap() {
            OriginSpec::Anchor(spec) => assert_eq!(spec.side.node, AnchorKeyword::Top),
            other => panic!("Expected anchor origin, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_offset_forms() {
        assert_eq!(
            parse_offset("8").unwrap(),
            OffsetSpec {
                main: 8.0,
                cross: None
            }
        );
        assert_eq!(
            parse_offset("8 -4").unwrap(),
            OffsetSpec {
                main: 8.0,
                cross: Some(-4.0)
            }
        );
        assert_eq!(
            parse_offset("8px, 4px").unwrap(),
            OffsetSpec {
                main: 8.0,
                cross: Some(4.0)
            }
        );
        assert!(parse_offset("eight").is_err());
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("300px").unwrap(), 300.0);
        assert_eq!(parse_length("12.5").unwrap(), 12.5);
        assert_eq!(parse_length("-6px").unwrap(), -6.0);
        assert_eq!(parse_length(".5px").unwrap(), 0.5);
        assert_eq!(parse_length("1.5e2px").unwrap(), 150.0);
        assert!(parse_length("50%").is_err());
        assert!(parse_length("auto").is_err());
    }

    #[test]
    fn test_parse_transform_none() {
        assert_eq!(parse_transform("none").unwrap(), TransformSpec::None);
    }

    #[test]
    fn test_parse_matrix() {
        let parsed = parse_transform("matrix(0.5, 0, 0, 0.5, 10, -20)").unwrap();
        assert_eq!(
            parsed,
            TransformSpec::Matrix([0.5, 0.0, 0.0, 0.5, 10.0, -20.0])
        );
    }

    #[test]
    fn test_parse_matrix_with_exponents() {
        // computed rotations print their near-zero terms in exponent form
        let parsed = parse_transform("matrix(1e-05, 0, 0, 1e-05, 0, 0)").unwrap();
        assert_eq!(
            parsed,
            TransformSpec::Matrix([1e-5, 0.0, 0.0, 1e-5, 0.0, 0.0])
        );
        let parsed = parse_transform("matrix(6.12323e-17, 1, -1, 6.12323e-17, 0, 0)").unwrap();
        assert_eq!(
            parsed,
            TransformSpec::Matrix([6.12323e-17, 1.0, -1.0, 6.12323e-17, 0.0, 0.0])
        );
    }

    #[test]
    fn test_parse_matrix3d() {
        let parsed = parse_transform(
            "matrix3d(2, 0, 0, 0, 0, 3, 0, 0, 0, 0, 1, 0, 5, 6, 0, 1)",
        )
        .unwrap();
        match parsed {
            TransformSpec::Matrix3d(values) => {
                assert_eq!(values[0], 2.0);
                assert_eq!(values[5], 3.0);
                assert_eq!(values[12], 5.0);
                assert_eq!(values[13], 6.0);
            }
            other => panic!("Expected matrix3d, got {:?}", other),
        }
    }

    #[test]
    fn test_matrix_arity_is_checked() {
        let errors = parse_transform("matrix(1, 0, 0)").unwrap_err();
        assert!(errors[0].to_string().contains("6 values"));
    }

    #[test]
    fn test_parse_transform_origin() {
        assert_eq!(
            parse_transform_origin("10px 20px").unwrap(),
            OriginPoint { x: 10.0, y: 20.0 }
        );
        assert_eq!(
            parse_transform_origin("10px 20px 0px").unwrap(),
            OriginPoint { x: 10.0, y: 20.0 }
        );
        assert_eq!(
            parse_transform_origin("7px").unwrap(),
            OriginPoint { x: 7.0, y: 7.0 }
        );
    }
}
