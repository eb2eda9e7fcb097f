use crate::error::Error;
use crate::module::{Instruction, Module, Symbol};
use crate::token::{Pos, Token};
use arch::{Class, Word};

/// The three lists of a module, always in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Definitions,
    Uses,
    Instructions,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Definitions => Phase::Uses,
            Phase::Uses => Phase::Instructions,
            Phase::Instructions => Phase::Definitions,
        }
    }
}

/// What the next token means. `remaining` counts tokens left in the current list,
/// so pairs start at an even count and end at an odd one.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Count(Phase),
    DefSymbol { remaining: usize },
    DefLocation { name: String, pos: Pos, remaining: usize },
    Use { remaining: usize },
    InstType { remaining: usize },
    InstWord { class: Class, remaining: usize },
}

impl State {
    fn expected(&self) -> &'static str {
        match self {
            State::Count(Phase::Definitions) => "definition count",
            State::Count(Phase::Uses) => "use count",
            State::Count(Phase::Instructions) => "instruction count",
            State::DefSymbol { .. } => "definition symbol",
            State::DefLocation { .. } => "definition location",
            State::Use { .. } => "use symbol",
            State::InstType { .. } => "instruction type",
            State::InstWord { .. } => "instruction word",
        }
    }

    /// State after a list item, once `remaining` tokens are still to come.
    fn after(phase: Phase, remaining: usize, more: State) -> State {
        if remaining == 0 {
            State::Count(phase.next())
        } else {
            more
        }
    }
}

/// Rebuilds modules from the token stream.
///
/// A module starts every time a definition count is read, even when it is zero,
/// and the last one is emitted when the tokens run out.
pub struct Parser<I> {
    tokens: I,
    state: State,
    module: Option<Module>,
    index: usize,
    next_start: usize,
    done: bool,
}

impl<'a, I: Iterator<Item = Token<'a>>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens,
            state: State::Count(Phase::Definitions),
            module: None,
            index: 0,
            next_start: 0,
            done: false,
        }
    }

    fn current(&mut self) -> &mut Module {
        self.module.get_or_insert_with(|| Module::new(0))
    }

    /// Close the module in progress and open the next one right after it.
    fn begin_module(&mut self) -> Option<Module> {
        let finished = self.module.take();
        if let Some(module) = &finished {
            self.next_start = module.next_start();
            self.index += 1;
        }
        self.module = Some(Module::new(self.next_start));
        finished
    }

    fn step(&mut self, tok: Token<'a>) -> Result<Option<Module>, Error> {
        let state = std::mem::replace(&mut self.state, State::Count(Phase::Definitions));
        let mut finished = None;

        self.state = match state {
            State::Count(phase) => {
                let n = parse_count(&tok)?;
                if phase == Phase::Definitions {
                    finished = self.begin_module();
                }
                let pairs = |n: usize| {
                    n.checked_mul(2)
                        .ok_or_else(|| malformed(&tok, format!("Count {n} is too large")))
                };
                match (phase, n) {
                    (_, 0) => State::Count(phase.next()),
                    (Phase::Definitions, n) => State::DefSymbol { remaining: pairs(n)? },
                    (Phase::Uses, n) => State::Use { remaining: n },
                    (Phase::Instructions, n) => State::InstType { remaining: pairs(n)? },
                }
            }

            State::DefSymbol { remaining } => State::DefLocation {
                name: tok.text.to_string(),
                pos: tok.pos,
                remaining: remaining - 1,
            },

            State::DefLocation {
                name,
                pos,
                remaining,
            } => {
                let location = tok.text.parse::<usize>().map_err(|_| {
                    malformed(&tok, format!("Location of `{name}` is not a number"))
                })?;
                self.current().define(Symbol::definition(&name, location, pos));
                let remaining = remaining - 1;
                State::after(Phase::Definitions, remaining, State::DefSymbol { remaining })
            }

            State::Use { remaining } => {
                self.current().add_use(Symbol::usage(tok.text, tok.pos));
                let remaining = remaining - 1;
                State::after(Phase::Uses, remaining, State::Use { remaining })
            }

            State::InstType { remaining } => {
                let head = tok
                    .text
                    .chars()
                    .next()
                    .ok_or_else(|| malformed(&tok, format!("Empty instruction type")))?;
                let class = Class::parse(head).map_err(|reason| malformed(&tok, reason))?;
                State::InstWord {
                    class,
                    remaining: remaining - 1,
                }
            }

            State::InstWord { class, remaining } => {
                let word = Word::parse(tok.text).map_err(|reason| malformed(&tok, reason))?;
                self.current().push(Instruction::new(class, word, tok.pos));
                let remaining = remaining - 1;
                State::after(Phase::Instructions, remaining, State::InstType { remaining })
            }
        };

        Ok(finished)
    }

    fn finish(&mut self) -> Result<Option<Module>, Error> {
        match &self.state {
            State::Count(Phase::Definitions) => Ok(self.module.take()),
            state => Err(Error::UnexpectedEof {
                module: self.index,
                expected: state.expected(),
            }),
        }
    }
}

impl<'a, I: Iterator<Item = Token<'a>>> Iterator for Parser<I> {
    type Item = Result<Module, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some(tok) = self.tokens.next() {
            match self.step(tok) {
                Ok(Some(module)) => return Some(Ok(module)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        self.finish().transpose()
    }
}

fn malformed(tok: &Token, reason: String) -> Error {
    Error::MalformedInput {
        token: tok.text.to_string(),
        pos: tok.pos,
        reason,
    }
}

fn parse_count(tok: &Token) -> Result<usize, Error> {
    tok.text
        .parse::<usize>()
        .map_err(|_| malformed(tok, format!("Count is not a non-negative integer")))
}
