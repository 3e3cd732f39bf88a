//! Query grammar: tokenizer, command-shape table and binding.
//!
//! A query is `name` or `name(arg, ...)` where an argument is a single word
//! or a bracketed list `[a, b, ...]`. The shape table maps each command name
//! to the ordered kinds of its parameters; everything the grammar can read but
//! the table rejects is reported as an invalid argument, everything it cannot
//! read at all as an unknown command.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::error::CommandError;
use crate::domain::Order;

/// Kind of one positional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// A single integer, optionally signed
    Int,
    /// A bracketed list of integers; items that do not parse are dropped
    IntList,
    /// A placeholder variable; the conventional name is shown in help
    Var(&'static str),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int => f.write_str("value"),
            Param::IntList => f.write_str("[values]"),
            Param::Var(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    BuildTree,
    Insert,
    Delete,
    Lookup,
    Traverse(Order),
    IsValidBst,
    Size,
    Height,
    FindMin,
    FindMax,
    CountLeaves,
    Clear,
}

/// One row of the command-shape table.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub verb: Verb,
    /// Canonical name first, then aliases
    pub names: &'static [&'static str],
    pub params: &'static [Param],
}

impl Shape {
    pub fn name(&self) -> &'static str {
        self.names[0]
    }

    /// Usage line, e.g. `insert(value, T)`.
    pub fn usage(&self) -> String {
        if self.params.is_empty() {
            self.name().to_string()
        } else {
            format!("{}({})", self.name(), self.params.iter().join(", "))
        }
    }
}

pub const SHAPES: &[Shape] = &[
    Shape {
        verb: Verb::BuildTree,
        names: &["build_tree"],
        params: &[Param::IntList, Param::Var("T")],
    },
    Shape {
        verb: Verb::Insert,
        names: &["insert"],
        params: &[Param::Int, Param::Var("T")],
    },
    Shape {
        verb: Verb::Delete,
        names: &["delete"],
        params: &[Param::Int, Param::Var("T")],
    },
    Shape {
        verb: Verb::Lookup,
        names: &["lookup"],
        params: &[Param::Int, Param::Var("T")],
    },
    Shape {
        verb: Verb::Traverse(Order::InOrder),
        names: &["inorder"],
        params: &[Param::Var("T"), Param::Var("L")],
    },
    Shape {
        verb: Verb::Traverse(Order::PreOrder),
        names: &["preorder"],
        params: &[Param::Var("T"), Param::Var("L")],
    },
    Shape {
        verb: Verb::Traverse(Order::PostOrder),
        names: &["postorder"],
        params: &[Param::Var("T"), Param::Var("L")],
    },
    Shape {
        verb: Verb::IsValidBst,
        names: &["is_valid_bst"],
        params: &[Param::Var("T")],
    },
    Shape {
        verb: Verb::Size,
        names: &["size"],
        params: &[Param::Var("T"), Param::Var("N")],
    },
    Shape {
        verb: Verb::Height,
        names: &["height"],
        params: &[Param::Var("T"), Param::Var("H")],
    },
    Shape {
        verb: Verb::FindMin,
        names: &["find_min"],
        params: &[Param::Var("T"), Param::Var("Min")],
    },
    Shape {
        verb: Verb::FindMax,
        names: &["find_max"],
        params: &[Param::Var("T"), Param::Var("Max")],
    },
    Shape {
        verb: Verb::CountLeaves,
        names: &["count_leaves"],
        params: &[Param::Var("T"), Param::Var("Count")],
    },
    Shape {
        verb: Verb::Clear,
        names: &["clear", "clear_tree"],
        params: &[],
    },
];

/// Case-insensitive lookup by canonical name or alias.
pub fn find_shape(name: &str) -> Option<&'static Shape> {
    SHAPES
        .iter()
        .find(|shape| shape.names.iter().any(|n| n.eq_ignore_ascii_case(name)))
}

/// Help text listing every supported query shape.
pub fn supported_queries() -> String {
    let lines = SHAPES.iter().map(|shape| format!("- {}", shape.usage()));
    format!("Supported queries:\n{}", lines.format("\n"))
}

/// Structural query quantities answered with a single count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Size,
    Height,
    Leaves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

/// A fully bound query, ready for evaluation.
///
/// Placeholder names are carried along only to echo them in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    BuildTree { values: Vec<i64>, tree: String },
    Insert { value: i64, tree: String },
    Delete { value: i64, tree: String },
    Lookup { value: i64 },
    Traverse { order: Order, binding: String },
    IsValidBst,
    Measure { metric: Metric, binding: String },
    Extreme { extreme: Extreme, binding: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    OpenList,
    CloseList,
    Comma,
    Word(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (pos, c) in input.char_indices() {
        let punct = match c {
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            '[' => Some(Token::OpenList),
            ']' => Some(Token::CloseList),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if punct.is_some() || c.is_whitespace() {
            if let Some(start) = word_start.take() {
                tokens.push(Token::Word(&input[start..pos]));
            }
            tokens.extend(punct);
        } else if word_start.is_none() {
            word_start = Some(pos);
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&input[start..]));
    }
    tokens
}

/// One syntactic argument: the words between two commas, or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg<'a> {
    Words(Vec<&'a str>),
    List(Vec<Vec<&'a str>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call<'a> {
    name: &'a str,
    args: Vec<Arg<'a>>,
}

fn parse_call<'a>(tokens: &[Token<'a>]) -> Option<Call<'a>> {
    let mut iter = tokens.iter();
    let name = match iter.next()? {
        Token::Word(name) => *name,
        _ => return None,
    };
    match iter.next() {
        None => return Some(Call { name, args: Vec::new() }),
        Some(Token::Open) => {}
        Some(_) => return None,
    }

    let mut args = Vec::new();
    let mut current: Option<Arg<'a>> = None;
    loop {
        match iter.next()? {
            Token::Word(word) => match current.get_or_insert_with(|| Arg::Words(Vec::new())) {
                Arg::Words(words) => words.push(*word),
                Arg::List(_) => return None,
            },
            Token::OpenList => {
                if current.is_some() {
                    return None;
                }
                current = Some(Arg::List(parse_list(&mut iter)?));
            }
            Token::Comma => args.push(current.take().unwrap_or(Arg::Words(Vec::new()))),
            Token::Close => {
                // `name()` has no arguments; `name(a,)` has an empty second one
                if current.is_some() || !args.is_empty() {
                    args.push(current.take().unwrap_or(Arg::Words(Vec::new())));
                }
                break;
            }
            Token::Open | Token::CloseList => return None,
        }
    }

    iter.next().is_none().then_some(Call { name, args })
}

fn parse_list<'t, 'a: 't>(
    iter: &mut impl Iterator<Item = &'t Token<'a>>,
) -> Option<Vec<Vec<&'a str>>> {
    let mut items = Vec::new();
    let mut item = Vec::new();
    loop {
        match iter.next()? {
            Token::Word(word) => item.push(*word),
            Token::Comma => items.push(std::mem::take(&mut item)),
            Token::CloseList => {
                items.push(item);
                return Some(items);
            }
            _ => return None,
        }
    }
}

/// Trim surrounding whitespace and one trailing period.
pub fn normalize(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_suffix('.')
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

fn parse_int(word: &str) -> Option<i64> {
    word.parse().ok()
}

fn is_variable(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Bound {
    Int(i64),
    IntList(Vec<i64>),
    Var(String),
}

fn invalid(shape: &Shape, reason: impl Into<String>) -> CommandError {
    CommandError::InvalidArgument {
        command: shape.name(),
        reason: reason.into(),
    }
}

fn bind(shape: &Shape, args: &[Arg<'_>]) -> Result<Vec<Bound>, CommandError> {
    if args.len() != shape.params.len() {
        return Err(invalid(
            shape,
            format!(
                "expected {} argument(s), got {}; usage: {}",
                shape.params.len(),
                args.len(),
                shape.usage()
            ),
        ));
    }
    shape
        .params
        .iter()
        .zip(args)
        .enumerate()
        .map(|(pos, (param, arg))| bind_one(shape, pos + 1, *param, arg))
        .collect()
}

fn bind_one(shape: &Shape, pos: usize, param: Param, arg: &Arg<'_>) -> Result<Bound, CommandError> {
    match (param, arg) {
        (Param::Int, Arg::Words(words)) => match words.as_slice() {
            [word] => parse_int(word)
                .map(Bound::Int)
                .ok_or_else(|| invalid(shape, format!("argument {pos} is not an integer: {word}"))),
            _ => Err(invalid(shape, format!("argument {pos} must be a single integer"))),
        },
        (Param::IntList, Arg::List(items)) => {
            let values: Vec<i64> = items
                .iter()
                .filter_map(|item| match item.as_slice() {
                    [word] => parse_int(word),
                    _ => None,
                })
                .collect();
            if values.is_empty() {
                Err(invalid(shape, "No valid values provided"))
            } else {
                Ok(Bound::IntList(values))
            }
        }
        (Param::IntList, Arg::Words(_)) => Err(invalid(
            shape,
            format!("argument {pos} must be a list such as [1, 2, 3]"),
        )),
        (Param::Var(_), Arg::Words(words)) => match words.as_slice() {
            [word] if is_variable(word) => Ok(Bound::Var((*word).to_string())),
            _ => Err(invalid(shape, format!("argument {pos} must be a variable name"))),
        },
        (_, Arg::List(_)) => Err(invalid(shape, format!("argument {pos} must not be a list"))),
    }
}

fn build(shape: &Shape, bound: Vec<Bound>) -> Result<Command, CommandError> {
    use Bound::{Int, IntList, Var};

    let command = match (shape.verb, bound.as_slice()) {
        (Verb::Clear, []) => Command::Clear,
        (Verb::BuildTree, [IntList(values), Var(tree)]) => Command::BuildTree {
            values: values.clone(),
            tree: tree.clone(),
        },
        (Verb::Insert, [Int(value), Var(tree)]) => Command::Insert {
            value: *value,
            tree: tree.clone(),
        },
        (Verb::Delete, [Int(value), Var(tree)]) => Command::Delete {
            value: *value,
            tree: tree.clone(),
        },
        (Verb::Lookup, [Int(value), Var(_)]) => Command::Lookup { value: *value },
        (Verb::Traverse(order), [Var(_), Var(binding)]) => Command::Traverse {
            order,
            binding: binding.clone(),
        },
        (Verb::IsValidBst, [Var(_)]) => Command::IsValidBst,
        (Verb::Size, [Var(_), Var(binding)]) => Command::Measure {
            metric: Metric::Size,
            binding: binding.clone(),
        },
        (Verb::Height, [Var(_), Var(binding)]) => Command::Measure {
            metric: Metric::Height,
            binding: binding.clone(),
        },
        (Verb::CountLeaves, [Var(_), Var(binding)]) => Command::Measure {
            metric: Metric::Leaves,
            binding: binding.clone(),
        },
        (Verb::FindMin, [Var(_), Var(binding)]) => Command::Extreme {
            extreme: Extreme::Min,
            binding: binding.clone(),
        },
        (Verb::FindMax, [Var(_), Var(binding)]) => Command::Extreme {
            extreme: Extreme::Max,
            binding: binding.clone(),
        },
        _ => return Err(invalid(shape, format!("usage: {}", shape.usage()))),
    };
    Ok(command)
}

/// Parse one line of user input into a bound [`Command`].
#[instrument(level = "debug")]
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let query = normalize(input);
    if query.is_empty() {
        return Err(CommandError::EmptyInput);
    }

    let tokens = tokenize(query);
    let call = parse_call(&tokens).ok_or(CommandError::UnknownCommand)?;
    let shape = find_shape(call.name).ok_or(CommandError::UnknownCommand)?;
    let bound = bind(shape, &call.args)?;
    let command = build(shape, bound)?;
    debug!(?command, "parsed");
    Ok(command)
}
