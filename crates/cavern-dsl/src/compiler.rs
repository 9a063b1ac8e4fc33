use cavern_core::{Item, Location, NamedWord, Room, Vocabulary, Word, World};
use cavern_engine::{Action, ActionBuilder, Adventure, Condition, Effect};
use tracing::{debug, warn};

use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::error::CompileError;
use crate::resolver::Resolver;

/// Compile a parsed script into an [`Adventure`].
///
/// The compilation happens in three passes over the declarations, after the
/// resolver has indexed every room and item name:
/// 1. **Vocabulary pass**: collect `word` groups and item aliases
/// 2. **World pass**: build rooms with resolved exits, then items with their
///    starting locations
/// 3. **Rule pass**: build occurs and player actions, recording every word an
///    action pattern mentions
///
/// Every semantic problem is collected; if there is at least one, the whole
/// compilation fails and no adventure is returned.
pub fn compile(script: &Script) -> Result<Adventure, CompileError> {
    let resolver = Resolver::resolve(script);
    let mut compiler = Compiler::new(&resolver);
    compiler.compile(script);

    // Resolver diagnostics (duplicates) first, then compiler diagnostics
    let mut diagnostics = resolver.diagnostics.clone();
    diagnostics.append(&mut compiler.diagnostics);
    if !diagnostics.is_empty() {
        return Err(CompileError::Semantic { diagnostics });
    }
    compiler.finish()
}

struct Compiler<'a> {
    resolver: &'a Resolver,
    diagnostics: Vec<Diagnostic>,
    declared: Vocabulary,
    discovered: Vocabulary,
    rooms: Vec<Room>,
    items: Vec<Item>,
    occurs: Vec<Action>,
    actions: Vec<Action>,
    start: Option<String>,
}

impl<'a> Compiler<'a> {
    fn new(resolver: &'a Resolver) -> Self {
        Self {
            resolver,
            diagnostics: Vec::new(),
            declared: Vocabulary::new(),
            discovered: Vocabulary::new(),
            rooms: Vec::new(),
            items: Vec::new(),
            occurs: Vec::new(),
            actions: Vec::new(),
            start: None,
        }
    }

    fn compile(&mut self, script: &Script) {
        for decl in &script.declarations {
            match &decl.node {
                Declaration::Word(word) => self.declare_word(word),
                Declaration::Item(item) => self.declare_aliases(item),
                _ => {}
            }
        }

        for decl in &script.declarations {
            match &decl.node {
                Declaration::Room(room) => self.compile_room(room),
                Declaration::Item(item) => self.compile_item(item),
                _ => {}
            }
        }

        let mut starts = 0;
        for decl in &script.declarations {
            match &decl.node {
                Declaration::Action(action) => {
                    if let Some(action) = self.compile_action(action) {
                        self.actions.push(action);
                    }
                }
                Declaration::Occurs(occurs) => {
                    if let Some(action) = self.compile_occurs(occurs) {
                        self.occurs.push(action);
                    }
                }
                Declaration::Start(name) => {
                    starts += 1;
                    self.start = self.room_ref(name);
                }
                _ => {}
            }
        }

        if starts > 1 {
            warn!(count = starts, "multiple start declarations, the last one wins");
        }
        if self.resolver.first_room().is_none() {
            self.error(0..0, "script declares no rooms");
        }
    }

    fn finish(self) -> Result<Adventure, CompileError> {
        let start = self
            .start
            .or_else(|| self.resolver.first_room().map(str::to_string))
            .unwrap_or_default();

        let mut world = World::new();
        for room in self.rooms {
            world.add_room(room).map_err(internal)?;
        }
        for item in self.items {
            world.add_item(item).map_err(internal)?;
        }

        let vocabulary = self.declared.merged(&self.discovered);
        debug!(
            rooms = world.rooms().len(),
            items = world.items().len(),
            occurs = self.occurs.len(),
            actions = self.actions.len(),
            words = vocabulary.len(),
            "compiled adventure"
        );

        Ok(Adventure::new(world, vocabulary, &start)
            .map_err(internal)?
            .with_occurs(self.occurs)
            .with_actions(self.actions))
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(span, message));
    }

    // -- Vocabulary --

    fn declare_word(&mut self, decl: &WordDecl) {
        self.declared
            .insert(NamedWord::with_synonyms(&decl.name.node, &decl.synonyms));
    }

    fn declare_aliases(&mut self, decl: &ItemDecl) {
        let aliases: Vec<&str> = decl
            .clauses
            .iter()
            .filter_map(|c| match &c.node {
                ItemClause::Alias(alias) => Some(alias.as_str()),
                _ => None,
            })
            .collect();
        if !aliases.is_empty() {
            self.declared
                .insert(NamedWord::with_synonyms(&decl.name.node, aliases));
        }
    }

    /// Look a token up in the declared groups, minting a fresh word if no
    /// group knows it. Every word resolved here joins the final vocabulary.
    fn resolve_word(&mut self, token: &str) -> Word {
        let word = self
            .declared
            .find_match(token)
            .cloned()
            .unwrap_or_else(|| NamedWord::new(token));
        self.discovered.insert(word.clone());
        Word::Named(word)
    }

    fn pattern_word(&mut self, pattern: &Pattern) -> Vec<Word> {
        match pattern {
            Pattern::Word(token) => vec![self.resolve_word(token)],
            Pattern::Any => vec![Word::Any],
            Pattern::None => vec![Word::None],
            Pattern::List(tokens) => tokens.iter().map(|t| self.resolve_word(t)).collect(),
        }
    }

    fn pattern_condition(&mut self, position: usize, pattern: &Pattern) -> Condition {
        let words = self.pattern_word(pattern);
        if let [word] = words.as_slice() {
            return Condition::word(position, word.clone());
        }
        Condition::Any(
            words
                .into_iter()
                .map(|word| Condition::word(position, word))
                .collect(),
        )
    }

    // -- World --

    fn compile_room(&mut self, decl: &RoomDecl) {
        let name = &decl.name;
        if !self.resolver.is_canonical_room(&name.node, &name.span) {
            return;
        }
        let Some(description) = &decl.description else {
            self.error(
                name.span.clone(),
                format!("room \"{}\" has no description", name.node),
            );
            return;
        };

        let mut room = Room::new(&name.node, description);
        for exit in &decl.exits {
            let target = match &exit.target {
                None => Some(name.node.clone()),
                Some(target) => self.room_ref(target),
            };
            let direction = self.resolve_word(&exit.direction.node);
            if let Some(target) = target {
                room = room.with_exit(direction, target);
            }
        }
        self.rooms.push(room);
    }

    fn compile_item(&mut self, decl: &ItemDecl) {
        let name = &decl.name;
        if !self.resolver.is_canonical_item(&name.node, &name.span) {
            return;
        }
        let Some(description) = &decl.description else {
            self.error(
                name.span.clone(),
                format!("item \"{}\" has no description", name.node),
            );
            return;
        };

        let mut item = Item::new(&name.node, description);
        let mut placement = None;
        for clause in &decl.clauses {
            match &clause.node {
                ItemClause::Alias(alias) => item = item.with_alias(alias),
                ItemClause::Portable => item = item.portable(),
                ItemClause::In(place) => placement = Some((place, clause.span.clone())),
            }
        }

        let location = match placement {
            Some((place, span)) => {
                let location = self.place(place);
                if location == Some(Location::Inventory) && !item.portable {
                    self.error(
                        span,
                        format!(
                            "item \"{}\" is not portable and cannot start in the inventory",
                            name.node
                        ),
                    );
                }
                location
            }
            None => match self.resolver.preceding_room(&name.node) {
                Some(room) => Some(Location::room(room)),
                None => {
                    self.error(
                        name.span.clone(),
                        format!(
                            "item \"{}\" is declared before any room and has no location",
                            name.node
                        ),
                    );
                    None
                }
            },
        };

        if let Some(location) = location {
            self.items.push(item.at(location));
        }
    }

    fn place(&mut self, place: &Place) -> Option<Location> {
        match place {
            Place::Room(room) => self.room_ref(room).map(Location::Room),
            Place::Nowhere => Some(Location::Nowhere),
            Place::Inventory => Some(Location::Inventory),
        }
    }

    /// Canonical name of a referenced room, or a diagnostic.
    fn room_ref(&mut self, name: &Spanned<String>) -> Option<String> {
        match self.resolver.room(&name.node) {
            Some(room) => Some(room.name.clone()),
            None => {
                self.error(
                    name.span.clone(),
                    format!("undefined room: \"{}\"", name.node),
                );
                None
            }
        }
    }

    /// Canonical name of a referenced item, or a diagnostic.
    fn item_ref(&mut self, name: &Spanned<String>) -> Option<String> {
        match self.resolver.item(&name.node) {
            Some(item) => Some(item.name.clone()),
            None => {
                self.error(
                    name.span.clone(),
                    format!("undefined item: \"{}\"", name.node),
                );
                None
            }
        }
    }

    // -- Rules --

    fn compile_action(&mut self, decl: &ActionDecl) -> Option<Action> {
        let verb = self.pattern_condition(1, &decl.verb.node);
        let noun = match &decl.noun {
            Some(noun) => self.pattern_condition(2, &noun.node),
            None => Condition::word(2, Word::None),
        };
        let builder = Action::builder().when(verb).and(noun);
        self.compile_rule(builder, &decl.conditions, &decl.thens)
    }

    fn compile_occurs(&mut self, decl: &OccursDecl) -> Option<Action> {
        self.compile_rule(Action::builder(), &decl.conditions, &decl.thens)
    }

    fn compile_rule(
        &mut self,
        mut builder: ActionBuilder,
        conditions: &[Spanned<CondExpr>],
        thens: &[Vec<Spanned<EffectStmt>>],
    ) -> Option<Action> {
        let before = self.diagnostics.len();

        for cond in conditions {
            if let Some(condition) = self.condition(cond) {
                builder = builder.and(condition);
            }
        }

        // A new `then` clause restarts the effect list.
        for effects in thens {
            for (i, stmt) in effects.iter().enumerate() {
                if let Some(effect) = self.effect(stmt) {
                    builder = if i == 0 {
                        builder.then(effect)
                    } else {
                        builder.and_then(effect)
                    };
                }
            }
        }

        (self.diagnostics.len() == before).then(|| builder.build())
    }

    fn position(&mut self, position: &Spanned<i64>) -> Option<usize> {
        match usize::try_from(position.node) {
            Ok(p) if p >= 1 => Some(p),
            _ => {
                self.error(
                    position.span.clone(),
                    format!("word position must be at least 1, found {}", position.node),
                );
                None
            }
        }
    }

    fn condition(&mut self, cond: &Spanned<CondExpr>) -> Option<Condition> {
        let condition = match &cond.node {
            CondExpr::Word { position, pattern } => {
                let position = self.position(position)?;
                self.pattern_condition(position, &pattern.node)
            }
            CondExpr::Unrecognized(position) => Condition::WordUnrecognized {
                position: self.position(position)?,
            },
            CondExpr::Here(item) => Condition::Here(self.item_ref(item)?),
            CondExpr::Carrying(item) => Condition::Carrying(self.item_ref(item)?),
            CondExpr::Present(item) => Condition::Present(self.item_ref(item)?),
            CondExpr::In(room) => Condition::In(self.room_ref(room)?),
            CondExpr::ExitWord(position) => Condition::HasExitForWord {
                position: self.position(position)?,
            },
            CondExpr::Exit(direction) => Condition::HasExit(self.resolve_word(direction)),
            CondExpr::Random(percent) => match u8::try_from(percent.node) {
                Ok(p) if p <= 100 => Condition::Random(p),
                _ => {
                    self.error(
                        percent.span.clone(),
                        format!("random percentage must be 0 to 100, found {}", percent.node),
                    );
                    return None;
                }
            },
            CondExpr::Moved(item) => Condition::HasMoved(self.item_ref(item)?),
            CondExpr::Exists(item) => Condition::Exists(self.item_ref(item)?),
            CondExpr::Flag(name) => Condition::FlagSet(name.clone()),
            CondExpr::Counter {
                name,
                comparison,
                value,
            } => Condition::counter(name, *comparison, *value),
            CondExpr::StringEq { name, value } => Condition::StringEquals {
                name: name.clone(),
                value: value.clone(),
            },
            CondExpr::Times(limit) => match u64::try_from(limit.node) {
                Ok(n) => Condition::Times(n),
                Err(_) => {
                    self.error(
                        limit.span.clone(),
                        format!("times must not be negative, found {}", limit.node),
                    );
                    return None;
                }
            },
            CondExpr::Always => Condition::Always,
            CondExpr::Not(inner) => Condition::negate(self.condition(inner)?),
            CondExpr::And(parts) => Condition::All(self.conditions(parts)?),
            CondExpr::Or(parts) => Condition::Any(self.conditions(parts)?),
        };
        Some(condition)
    }

    /// Compile every part so each one reports its own diagnostics.
    fn conditions(&mut self, parts: &[Spanned<CondExpr>]) -> Option<Vec<Condition>> {
        let compiled: Vec<Option<Condition>> = parts.iter().map(|p| self.condition(p)).collect();
        compiled.into_iter().collect()
    }

    fn effect(&mut self, stmt: &Spanned<EffectStmt>) -> Option<Effect> {
        let effect = match &stmt.node {
            EffectStmt::Print(text) => Effect::Print(text.clone()),
            EffectStmt::Println(text) => Effect::Println(text.clone()),
            EffectStmt::Look => Effect::Look,
            EffectStmt::Inventory => Effect::Inventory,
            EffectStmt::GoWord(position) => Effect::GoWord {
                position: self.position(position)?,
            },
            EffectStmt::Go(direction) => Effect::Go(self.resolve_word(direction)),
            EffectStmt::Goto(room) => Effect::Goto(self.room_ref(room)?),
            EffectStmt::Get(item) => Effect::Get(self.item_ref(item)?),
            EffectStmt::Drop(item) => Effect::Drop(self.item_ref(item)?),
            EffectStmt::PutHere(item) => Effect::PutHere(self.item_ref(item)?),
            EffectStmt::PutIn { item, place } => {
                let item = self.item_ref(item);
                let to = self.place(place);
                Effect::Put {
                    item: item?,
                    to: to?,
                }
            }
            EffectStmt::Swap(a, b) => {
                let a = self.item_ref(a);
                let b = self.item_ref(b);
                Effect::Swap(a?, b?)
            }
            EffectStmt::Destroy(item) => Effect::Destroy(self.item_ref(item)?),
            EffectStmt::FlagSet(name) => Effect::SetFlag(name.clone()),
            EffectStmt::FlagReset(name) => Effect::ResetFlag(name.clone()),
            EffectStmt::CounterSet { name, value } => Effect::SetCounter {
                name: name.clone(),
                value: *value,
            },
            EffectStmt::CounterIncrement(name) => Effect::Increment(name.clone()),
            EffectStmt::CounterDecrement(name) => Effect::Decrement(name.clone()),
            EffectStmt::CounterReset(name) => Effect::ResetCounter(name.clone()),
            EffectStmt::StringSet { name, value } => Effect::SetString {
                name: name.clone(),
                value: value.clone(),
            },
            EffectStmt::Quit => Effect::Quit,
        };
        Some(effect)
    }
}

/// Building the world failed after every check passed.
fn internal(err: impl std::fmt::Display) -> CompileError {
    CompileError::Semantic {
        diagnostics: vec![Diagnostic::error(0..0, err.to_string())],
    }
}
