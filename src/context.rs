use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::{Error, Result};

/// Options declared on the root command and shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub file: Option<String>,
    pub debug: bool,
}

/// Cancellation flag shared between the signal handler and the running command.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a subcommand gets to see. Built once after parsing and never mutated.
#[derive(Debug, Clone)]
pub struct Context {
    pub options: GlobalOptions,
    cancellation: Cancellation,
}

impl Context {
    pub fn new(options: GlobalOptions, cancellation: Cancellation) -> Self {
        Self {
            options,
            cancellation,
        }
    }

    pub fn check_cancelled(&self) -> Result<()> {
        match self.cancellation.is_cancelled() {
            true => Err(Error::Cancelled),
            false => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cancellation, Context, GlobalOptions};
    use crate::error::Error;

    #[test]
    fn cancellation_is_shared_between_clones() {
        let cancellation = Cancellation::default();
        let ctx = Context::new(GlobalOptions::default(), cancellation.clone());
        assert!(ctx.check_cancelled().is_ok());

        cancellation.cancel();
        assert!(matches!(ctx.check_cancelled(), Err(Error::Cancelled)));
    }
}
