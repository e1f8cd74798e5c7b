//! Abstract syntax tree produced by the parser.
//!
//! The shapes here follow the teacher's `syntax.rs` naming closely (`Word`,
//! `TextUnit`, `Redir`, `SimpleCommand`, `Pipeline`, `AndOrList`, ...) but are
//! synchronous, self-contained value types: nothing here borrows, suspends,
//! or refers back to a running environment.

use crate::error::Position;

/// A shell variable name, or one of the special parameters (`?`, `#`, `@`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamName {
    Positional(u32),
    Special(char),
    Variable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrimSide {
    Prefix,
    Suffix,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrimLength {
    Shortest,
    Longest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trim {
    pub side: TrimSide,
    pub length: TrimLength,
    pub pattern: Word,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modifier {
    /// `${name}` with no modifier.
    None,
    /// `${#name}`: string length.
    Length,
    /// `${name:-word}` / `${name-word}` (colon present iff `use_default_for_empty`).
    UseDefault { colon: bool, word: Word },
    /// `${name:=word}` / `${name=word}`.
    AssignDefault { colon: bool, word: Word },
    /// `${name:+word}` / `${name+word}`.
    UseAlternative { colon: bool, word: Word },
    /// `${name:?word}` / `${name?word}`.
    Error { colon: bool, word: Word },
    Trim(Trim),
    /// `${name/pat/str}` or `${name//pat/str}`.
    Replace {
        all: bool,
        pattern: Word,
        replacement: Word,
    },
    /// `${name:offset:length}`.
    Substring { offset: Word, length: Option<Word> },
    UpperFirst,
    UpperAll,
    LowerFirst,
    LowerAll,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Subject to further word splitting and globbing when unquoted.
    Single,
    /// `"${name[@]}"`: expands to one field per array element.
    Multiple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracedParam {
    pub name: ParamName,
    pub index: Option<Box<Word>>,
    pub modifier: Modifier,
    pub mode: ExpansionMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextUnit {
    Literal(char),
    /// `$name`
    RawParam(ParamName),
    /// `${...}`
    BracedParam(BracedParam),
    /// `` $(...) `` or `` `...` ``
    CommandSubst(List),
    /// `$((...))`
    Arithmetic(Word),
    /// `~` or `~name` (only valid at the start of a word part).
    Tilde(String),
}

/// A run of text, e.g. the contents of a double-quoted string or an
/// unquoted word fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text(pub Vec<TextUnit>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordUnit {
    Unquoted(TextUnit),
    SingleQuote(String),
    DoubleQuote(Text),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Word {
    pub units: Vec<WordUnit>,
    pub position: Position,
}

impl Word {
    pub fn new(position: Position) -> Self {
        Word {
            units: Vec::new(),
            position,
        }
    }

    pub fn from_literal(s: &str, position: Position) -> Self {
        Word {
            units: s
                .chars()
                .map(|c| WordUnit::Unquoted(TextUnit::Literal(c)))
                .collect(),
            position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignValue {
    Scalar(Word),
    Array(Vec<Word>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assign {
    pub name: String,
    pub value: AssignValue,
    pub position: Position,
}

pub type Fd = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirOp {
    FileIn,
    FileOut,
    FileAppend,
    FileClobber,
    FileInOut,
    DupIn,
    DupOut,
    HereDoc,
    HereDocTabs,
    HereString,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HereDoc {
    pub delimiter: String,
    pub quoted: bool,
    pub remove_tabs: bool,
    pub content: Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirBody {
    Normal { operand: Word },
    HereDoc(HereDoc),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redir {
    pub fd: Option<Fd>,
    pub op: RedirOp,
    pub body: RedirBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleCommand {
    pub assigns: Vec<Assign>,
    pub words: Vec<Word>,
    pub redirs: Vec<Redir>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElifThen {
    pub condition: List,
    pub body: List,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseItem {
    pub patterns: Vec<Word>,
    pub body: List,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompoundCommand {
    Grouping(List),
    Subshell(List),
    For {
        name: String,
        words: Option<Vec<Word>>,
        body: List,
    },
    While { condition: List, body: List },
    Until { condition: List, body: List },
    If {
        clauses: Vec<ElifThen>,
        else_part: Option<List>,
    },
    Case { subject: Word, items: Vec<CaseItem> },
    /// `[[ expr ]]`, holding the unparsed token text re-parsed by the
    /// conditional-expression evaluator in `shsh-semantics`.
    Conditional(Vec<Word>),
    /// `((expr))`.
    Arithmetic(Word),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullCompoundCommand {
    pub command: CompoundCommand,
    pub redirs: Vec<Redir>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub has_keyword: bool,
    pub name: String,
    pub body: Box<FullCompoundCommand>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Simple(SimpleCommand),
    Compound(FullCompoundCommand),
    Function(FunctionDefinition),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
    pub negation: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AndOr {
    And,
    Or,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AndOrList {
    pub first: Pipeline,
    pub rest: Vec<(AndOr, Pipeline)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    Semicolon,
    /// Reserved for asynchronous lists; the executor treats it like `;` since
    /// job control is a non-goal.
    Async,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub and_or: AndOrList,
    pub separator: Option<Separator>,
}

/// A full script, or the body of a compound command: a sequence of items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List(pub Vec<Item>);
