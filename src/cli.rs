use clap::Parser;
use std::path::PathBuf;

use crate::core::CollisionPolicy;

/// Sort images by choosing your favourite from random pairs.
///
/// The chosen image of each pair is moved to the kept directory, the other
/// one to the discarded directory.
#[derive(Parser, Debug)]
#[command(name = "pairsort", version)]
pub struct Cli {
    /// One or more image files to be sorted
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Seed for the initial shuffle, for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for kept images [default: .chosen]
    #[arg(long, value_name = "DIR")]
    pub kept_dir: Option<PathBuf>,

    /// Directory for discarded images [default: .discarded]
    #[arg(long, value_name = "DIR")]
    pub discarded_dir: Option<PathBuf>,

    /// What to do when the destination already has a file with the same name
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Rename)]
    pub on_collision: CollisionPolicy,

    /// Also write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_files_are_required() {
        let err = Cli::try_parse_from(["pairsort"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_parses_files_and_defaults() {
        let cli = Cli::try_parse_from(["pairsort", "a.jpg", "b.png"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
        assert_eq!(cli.on_collision, CollisionPolicy::Rename);
        assert!(cli.seed.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_rejects_unknown_collision_policy() {
        let err = Cli::try_parse_from(["pairsort", "--on-collision", "merge", "a.jpg"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
