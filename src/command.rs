// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! PRESTO `rfifind` invocation carrying the block ranges.

use std::fmt;
use std::path::PathBuf;

use crate::IntervalList;

/// `rfifind -blocks N -o EXP -zapints a:b,... [-filterbank FILE]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfifindCommand {
    pub blocks: u32,
    pub output_base: String,
    pub intervals: IntervalList,
    pub filterbank: Option<PathBuf>,
}

impl fmt::Display for RfifindCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rfifind -blocks {} -o {} -zapints {}",
            self.blocks, self.output_base, self.intervals
        )?;
        if let Some(file) = &self.filterbank {
            write!(f, " -filterbank {}", file.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockRange;

    fn intervals() -> IntervalList {
        [BlockRange { start: 1, stop: 4 }, BlockRange { start: 5, stop: 6 }]
            .into_iter()
            .collect()
    }

    #[test]
    fn renders_without_filterbank() {
        let cmd = RfifindCommand {
            blocks: 1,
            output_base: "n15dh01a".into(),
            intervals: intervals(),
            filterbank: None,
        };
        assert_eq!(cmd.to_string(), "rfifind -blocks 1 -o n15dh01a -zapints 1:4,5:6");
    }

    #[test]
    fn renders_with_filterbank() {
        let cmd = RfifindCommand {
            blocks: 4,
            output_base: "n15dh01a".into(),
            intervals: intervals(),
            filterbank: Some(PathBuf::from("n15dh01a.fil")),
        };
        assert_eq!(
            cmd.to_string(),
            "rfifind -blocks 4 -o n15dh01a -zapints 1:4,5:6 -filterbank n15dh01a.fil"
        );
    }
}
