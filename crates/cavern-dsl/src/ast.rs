use cavern_engine::Comparison;

/// Source span as a byte range.
pub type Span = std::ops::Range<usize>;

/// An AST node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    /// The wrapped AST node.
    pub node: T,
    /// The byte range of this node in the source text.
    pub span: Span,
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Top-level declarations in source order.
    pub declarations: Vec<Spanned<Declaration>>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `room NAME "description" exit*`
    Room(RoomDecl),
    /// `item NAME "description" clause*`
    Item(ItemDecl),
    /// `word IDENT "synonym"*`
    Word(WordDecl),
    /// `action pattern pattern? when? then+`
    Action(ActionDecl),
    /// `occurs when? then+`
    Occurs(OccursDecl),
    /// `start NAME`
    Start(Spanned<String>),
}

/// A room declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDecl {
    /// Room name.
    pub name: Spanned<String>,
    /// Description; required, but checked by the compiler.
    pub description: Option<String>,
    /// Exits in declaration order.
    pub exits: Vec<ExitDecl>,
}

/// An unresolved exit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitDecl {
    /// Direction word.
    pub direction: Spanned<String>,
    /// Target room; `None` means the room itself.
    pub target: Option<Spanned<String>>,
}

/// An item declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDecl {
    /// Item name.
    pub name: Spanned<String>,
    /// Description; required, but checked by the compiler.
    pub description: Option<String>,
    /// Aliases, portability, and placement clauses in source order.
    pub clauses: Vec<Spanned<ItemClause>>,
}

/// One clause of an item declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemClause {
    /// `alias "word"`
    Alias(String),
    /// `portable`
    Portable,
    /// `in PLACE`
    In(Place),
}

/// Where an item is put.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// A named room.
    Room(Spanned<String>),
    /// Out of play.
    Nowhere,
    /// The player's inventory.
    Inventory,
}

/// A vocabulary group.
#[derive(Debug, Clone, PartialEq)]
pub struct WordDecl {
    /// Canonical word.
    pub name: Spanned<String>,
    /// Extra spellings.
    pub synonyms: Vec<String>,
}

/// A word pattern in an action or a `word` condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A single word.
    Word(String),
    /// `any`
    Any,
    /// `none`
    None,
    /// `[a, b, ...]`: any of the listed words.
    List(Vec<String>),
}

/// A player action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDecl {
    /// Verb pattern.
    pub verb: Spanned<Pattern>,
    /// Noun pattern; omitted means the command must have no noun.
    pub noun: Option<Spanned<Pattern>>,
    /// Guard conditions.
    pub conditions: Vec<Spanned<CondExpr>>,
    /// One effect list per `then` clause.
    pub thens: Vec<Vec<Spanned<EffectStmt>>>,
}

/// An occurs rule.
#[derive(Debug, Clone, PartialEq)]
pub struct OccursDecl {
    /// Guard conditions.
    pub conditions: Vec<Spanned<CondExpr>>,
    /// One effect list per `then` clause.
    pub thens: Vec<Vec<Spanned<EffectStmt>>>,
}

/// A condition expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CondExpr {
    /// `word N pattern`
    Word {
        /// 1-based position.
        position: Spanned<i64>,
        /// Expected word.
        pattern: Spanned<Pattern>,
    },
    /// `unrecognized N`
    Unrecognized(Spanned<i64>),
    /// `here NAME`
    Here(Spanned<String>),
    /// `carrying NAME`
    Carrying(Spanned<String>),
    /// `present NAME`
    Present(Spanned<String>),
    /// `in NAME`
    In(Spanned<String>),
    /// `exit word N`
    ExitWord(Spanned<i64>),
    /// `exit IDENT`
    Exit(String),
    /// `random N`
    Random(Spanned<i64>),
    /// `moved NAME`
    Moved(Spanned<String>),
    /// `exists NAME`
    Exists(Spanned<String>),
    /// `flag IDENT`
    Flag(String),
    /// `counter IDENT CMP INT`
    Counter {
        /// Counter name.
        name: String,
        /// Operator.
        comparison: Comparison,
        /// Right-hand side.
        value: i64,
    },
    /// `string IDENT = STRING`
    StringEq {
        /// Variable name.
        name: String,
        /// Expected value.
        value: String,
    },
    /// `times N`
    Times(Spanned<i64>),
    /// `always`
    Always,
    /// `not cond`
    Not(Box<Spanned<CondExpr>>),
    /// `( a and b )`
    And(Vec<Spanned<CondExpr>>),
    /// `a or b`
    Or(Vec<Spanned<CondExpr>>),
}

/// An effect statement.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectStmt {
    /// `print STRING`
    Print(String),
    /// `println STRING`
    Println(String),
    /// `look`
    Look,
    /// `inventory`
    Inventory,
    /// `go word N`
    GoWord(Spanned<i64>),
    /// `go IDENT`
    Go(String),
    /// `goto NAME`
    Goto(Spanned<String>),
    /// `get NAME`
    Get(Spanned<String>),
    /// `drop NAME`
    Drop(Spanned<String>),
    /// `put NAME here`
    PutHere(Spanned<String>),
    /// `put NAME in PLACE`
    PutIn {
        /// Item to move.
        item: Spanned<String>,
        /// Destination.
        place: Place,
    },
    /// `swap NAME NAME`
    Swap(Spanned<String>, Spanned<String>),
    /// `destroy NAME`
    Destroy(Spanned<String>),
    /// `flag set IDENT`
    FlagSet(String),
    /// `flag reset IDENT`
    FlagReset(String),
    /// `counter set IDENT INT`
    CounterSet {
        /// Counter name.
        name: String,
        /// New value.
        value: i64,
    },
    /// `counter increment IDENT`
    CounterIncrement(String),
    /// `counter decrement IDENT`
    CounterDecrement(String),
    /// `counter reset IDENT`
    CounterReset(String),
    /// `string set IDENT STRING`
    StringSet {
        /// Variable name.
        name: String,
        /// New value.
        value: String,
    },
    /// `quit`
    Quit,
}
