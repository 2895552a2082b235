//! Line grammar of the text graph format.
//!
//! ```text
//!  . . . = whitespace*     a a a = any character except `]`
//!  x x x = non-whitespace  E     = end of line
//!
//!          E               E
//!          #               < >                       E
//!    . . . [ a a a ] . . . - - . . . [ a a a ] . . . x x x . . . E
//!  Leading  NameA  AfterA  Operator  BeforeB NameB  AfterB Weight Trailing
//! ```
//!
//! Each character drives one transition of [`State`]; the state reached at
//! the end of the line decides what the line was.

use crate::error::MalformedLine;

/// Edge operator as written between the two vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeOp {
    /// `--`
    Undirected,
    /// `->`
    Forward,
    /// `<-`
    Backward,
}

impl EdgeOp {
    /// The operator as written.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undirected => "--",
            Self::Forward => "->",
            Self::Backward => "<-",
        }
    }

    /// Whether the operator makes the graph directed.
    #[must_use]
    pub const fn is_directed(self) -> bool {
        !matches!(self, Self::Undirected)
    }

    fn from_chars(first: char, second: char) -> Option<Self> {
        match (first, second) {
            ('-', '-') => Some(Self::Undirected),
            ('-', '>') => Some(Self::Forward),
            ('<', '-') => Some(Self::Backward),
            _ => None,
        }
    }
}

/// One decoded edge line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeLine {
    /// Name on the left of the operator.
    pub left: String,
    /// Name on the right of the operator.
    pub right: String,
    /// The operator.
    pub op: EdgeOp,
    /// Trailing weight, if present.
    pub weight: Option<i64>,
}

impl EdgeLine {
    /// Endpoints in arc order; `<-` swaps them.
    #[must_use]
    pub fn endpoints(&self) -> (&str, &str) {
        match self.op {
            EdgeOp::Backward => (&self.right, &self.left),
            EdgeOp::Undirected | EdgeOp::Forward => (&self.left, &self.right),
        }
    }
}

/// What a single line turned out to be.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedLine {
    /// Blank or comment.
    Empty,
    /// A lone `[name]`.
    VertexOnly(String),
    /// `[a] op [b]` with an optional weight.
    Edge(EdgeLine),
    /// The line does not match the grammar.
    Error(MalformedLine),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Leading,
    NameA,
    AfterA,
    Operator,
    BeforeB,
    NameB,
    AfterB,
    Weight,
    Trailing,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Slot {
    Left,
    Op,
    Right,
    Weight,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Action {
    Skip,
    Comment,
    Enter(State),
    Push(Slot),
    PushEnter(Slot, State),
    Reject,
}

fn transition(state: State, c: char) -> Action {
    let blank = c.is_whitespace();
    match state {
        State::Leading if blank => Action::Skip,
        State::Leading if c == '#' => Action::Comment,
        State::Leading if c == '[' => Action::Enter(State::NameA),
        State::NameA if c == ']' => Action::Enter(State::AfterA),
        State::NameA => Action::Push(Slot::Left),
        State::AfterA if blank => Action::Skip,
        State::AfterA if c == '-' || c == '<' => Action::PushEnter(Slot::Op, State::Operator),
        State::Operator if c == '-' || c == '>' => Action::PushEnter(Slot::Op, State::BeforeB),
        State::BeforeB if blank => Action::Skip,
        State::BeforeB if c == '[' => Action::Enter(State::NameB),
        State::NameB if c == ']' => Action::Enter(State::AfterB),
        State::NameB => Action::Push(Slot::Right),
        State::AfterB if blank => Action::Skip,
        State::AfterB => Action::PushEnter(Slot::Weight, State::Weight),
        State::Weight if blank => Action::Enter(State::Trailing),
        State::Weight => Action::Push(Slot::Weight),
        State::Trailing if blank => Action::Skip,
        _ => Action::Reject,
    }
}

#[derive(Default)]
struct Fields {
    left: String,
    op: String,
    right: String,
    weight: String,
}

impl Fields {
    fn push(&mut self, slot: Slot, c: char) {
        match slot {
            Slot::Left => self.left.push(c),
            Slot::Op => self.op.push(c),
            Slot::Right => self.right.push(c),
            Slot::Weight => self.weight.push(c),
        }
    }

    fn into_edge(self) -> ParsedLine {
        if self.left.is_empty() || self.right.is_empty() {
            return ParsedLine::Error(MalformedLine::EmptyVertexName);
        }
        let mut chars = self.op.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(first), Some(second)) => EdgeOp::from_chars(first, second),
            _ => None,
        };
        let Some(op) = op else {
            return ParsedLine::Error(MalformedLine::InvalidOperator);
        };
        let weight = if self.weight.is_empty() {
            None
        } else {
            match self.weight.parse::<i64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    return ParsedLine::Error(MalformedLine::InvalidWeight { token: self.weight });
                }
            }
        };
        ParsedLine::Edge(EdgeLine {
            left: self.left,
            right: self.right,
            op,
            weight,
        })
    }
}

/// Decodes one line.
///
/// # Examples
/// ```
/// use strider_providers_text::{EdgeOp, ParsedLine, parse_line};
///
/// assert_eq!(parse_line("  # comment"), ParsedLine::Empty);
/// assert_eq!(parse_line("[A]"), ParsedLine::VertexOnly("A".into()));
/// let ParsedLine::Edge(edge) = parse_line("[A] <- [B] 5") else {
///     panic!("edge expected");
/// };
/// assert_eq!(edge.op, EdgeOp::Backward);
/// assert_eq!(edge.endpoints(), ("B", "A"));
/// assert_eq!(edge.weight, Some(5));
/// ```
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine {
    let mut state = State::Leading;
    let mut fields = Fields::default();
    for (index, c) in line.chars().enumerate() {
        match transition(state, c) {
            Action::Skip => {}
            Action::Comment => return ParsedLine::Empty,
            Action::Enter(next) => state = next,
            Action::Push(slot) => fields.push(slot, c),
            Action::PushEnter(slot, next) => {
                fields.push(slot, c);
                state = next;
            }
            Action::Reject => {
                return ParsedLine::Error(MalformedLine::UnexpectedCharacter {
                    column: index + 1,
                    found: c,
                });
            }
        }
    }

    match state {
        State::Leading => ParsedLine::Empty,
        State::AfterA if fields.left.is_empty() => ParsedLine::Error(MalformedLine::EmptyVertexName),
        State::AfterA => ParsedLine::VertexOnly(fields.left),
        State::AfterB | State::Weight | State::Trailing => fields.into_edge(),
        State::NameA | State::Operator | State::BeforeB | State::NameB => {
            ParsedLine::Error(MalformedLine::UnexpectedEnd)
        }
    }
}
