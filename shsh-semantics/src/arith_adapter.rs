//! Bridges `shsh_arith::Variables` onto the real variable table so
//! `shsh-arith` does not need to depend on `shsh-env`.

use shsh_arith::Variables;

use crate::state::State;

pub struct StateVars<'a>(pub &'a mut State);

impl Variables for StateVars<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.0.env.vars.get_scalar(name).map(|s| s.to_string())
    }

    fn set(&mut self, name: &str, value: String) {
        self.0.env.vars.set_scalar(name, value).ok();
    }
}
