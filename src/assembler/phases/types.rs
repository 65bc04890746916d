use super::{fit, generate, parse};
use derive_more::Constructor;
use std::fmt::Display;

/*
    Phases:

        1.  Tokenization: Comments (`//` to the end of the line) are stripped, and each
            remaining line is split at whitespace and commas. The first token of a line is
            its mnemonic, the rest are operand tokens. Blank lines produce nothing.

        2.  Parsing: Each operand token is parsed into an `Operand`, and the mnemonic is
            looked up in the `Isa` by name and operand count, giving an `Expression`.

        3.  Generation: The `Expression`'s operands are checked against the kinds its
            `InstDef` accepts, then it is encoded as the opcode followed by its payload and
            appended to the output.

        4.  Fitting: Once every line has been encoded, the output is zero-padded up to (or
            rejected for exceeding) the requested binary size.

    Phases 2 and 3 run line by line, so the first error in source order is the one
    reported.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Loc {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T: Sized> {
    loc: Option<Loc>,
    val: T,
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(line: {}, col: {})", self.line, self.col)
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            None => write!(f, "@<unknown location>: {}", self.val),
            Some(loc) => write!(f, "@{}: {}", loc, self.val),
        }
    }
}

impl<T> Located<T> {
    fn new(loc: Option<Loc>, val: T) -> Self {
        Located { loc, val }
    }

    pub fn with_loc(loc: Loc, val: T) -> Self {
        Located::new(Some(loc), val)
    }

    pub fn loc(&self) -> Option<Loc> {
        self.loc
    }

    pub fn get(&self) -> &T {
        &self.val
    }

    pub fn value(self) -> T {
        self.val
    }

    pub fn map<S, F>(self, f: F) -> Located<S>
    where
        F: FnOnce(T) -> S,
    {
        Located::new(self.loc, f(self.val))
    }

    pub fn map_result<S, E, F>(self, f: F) -> Result<Located<S>, Located<E>>
    where
        F: FnOnce(T) -> Result<S, E>,
    {
        match f(self.val) {
            Ok(s) => Ok(Located::new(self.loc, s)),
            Err(err) => Err(Located::new(self.loc, err)),
        }
    }

    pub fn transfer<S>(&self, s: S) -> Located<S> {
        Located::new(self.loc, s)
    }
}

impl<T> From<T> for Located<T> {
    fn from(val: T) -> Self {
        Located { loc: None, val }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse(Located<parse::Error>),
    Generate(Located<generate::Error>),
    Fit(fit::Error),
}

impl From<Located<parse::Error>> for Error {
    fn from(err: Located<parse::Error>) -> Self {
        Error::Parse(err)
    }
}

impl From<Located<generate::Error>> for Error {
    fn from(err: Located<generate::Error>) -> Self {
        Error::Generate(err)
    }
}

impl From<fit::Error> for Error {
    fn from(err: fit::Error) -> Self {
        Error::Fit(err)
    }
}

impl Error {
    pub fn loc(&self) -> Option<Loc> {
        match self {
            Error::Parse(err) => err.loc(),
            Error::Generate(err) => err.loc(),
            Error::Fit(_) => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assembly Error (in ")?;
        match self {
            Error::Parse(_) => write!(f, "Parser"),
            Error::Generate(_) => write!(f, "Generator"),
            Error::Fit(_) => write!(f, "Fitter"),
        }?;
        write!(f, "): ")?;
        match self {
            Error::Parse(err) => write!(f, "{}", err),
            Error::Generate(err) => write!(f, "{}", err),
            Error::Fit(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}
