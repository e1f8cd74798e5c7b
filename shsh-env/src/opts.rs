//! Shell options (`set -e`/`-u`/`-o pipefail`/`-x`/`-f`), tracked as an
//! `enumset::EnumSet` so the executor can test/toggle them with plain set
//! operations instead of five separate booleans.

use enumset::{EnumSet, EnumSetType};
use strum::EnumString;

#[derive(Debug, EnumSetType, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ShellOpt {
    /// `set -e`: halt the script on any non-zero exit not guarded by
    /// `&&`/`||`.
    Errexit,
    /// `set -u`: referencing an unset variable is an expansion error.
    Nounset,
    /// `set -o pipefail`: a pipeline's exit is its rightmost non-zero stage.
    Pipefail,
    /// `set -x`: trace each simple command to stderr before running it.
    Xtrace,
    /// `set -f`: disable pathname expansion.
    Noglob,
}

pub type ShellOpts = EnumSet<ShellOpt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_option_names() {
        assert_eq!("errexit".parse::<ShellOpt>(), Ok(ShellOpt::Errexit));
        assert_eq!("pipefail".parse::<ShellOpt>(), Ok(ShellOpt::Pipefail));
        assert!("bogus".parse::<ShellOpt>().is_err());
    }

    #[test]
    fn set_operations() {
        let mut opts = ShellOpts::empty();
        opts |= ShellOpt::Errexit;
        assert!(opts.contains(ShellOpt::Errexit));
        assert!(!opts.contains(ShellOpt::Nounset));
        opts.remove(ShellOpt::Errexit);
        assert!(!opts.contains(ShellOpt::Errexit));
    }
}
