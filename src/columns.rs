use crate::error::{PlotError, Result};
use crate::types::Side;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Position tags that take part in the comparison
pub const TAG_RANGE: RangeInclusive<u32> = 26..=38;

/// Midpoint tag, excluded from both groups
pub const MIDPOINT_TAG: u32 = 32;

/// Repeat indices recognised in bend angle tables
pub const REPEAT_RANGE: RangeInclusive<u32> = 1..=3;

/// A parsed column name of the form `t<N>` or `t<N>r<R>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnTag {
    pub tag: u32,
    pub repeat: Option<u32>,
}

impl ColumnTag {
    /// Parses a column name. Anything other than `t<digits>` optionally
    /// followed by `r<digits>` yields `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix('t')?;
        let (tag, repeat) = match rest.split_once('r') {
            Some((tag, repeat)) => (tag, Some(repeat)),
            None => (rest, None),
        };

        let tag = parse_digits(tag)?;
        let repeat = match repeat {
            Some(r) => Some(parse_digits(r)?),
            None => None,
        };

        Some(ColumnTag { tag, repeat })
    }

    /// Group the tag belongs to, `None` for the midpoint
    pub fn side(&self) -> Option<Side> {
        match self.tag.cmp(&MIDPOINT_TAG) {
            std::cmp::Ordering::Less => Some(Side::Negative),
            std::cmp::Ordering::Greater => Some(Side::Positive),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Column naming scheme of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLayout {
    /// `t<N>` or `t<N>r<R>`, both averaged together (pin signal tables)
    Mixed,
    /// Up to three repeats per tag, `t<N>r<R>` (bend angle tables)
    Repeats,
}

impl TagLayout {
    fn accepts(&self, tag: &ColumnTag) -> bool {
        if !TAG_RANGE.contains(&tag.tag) {
            return false;
        }
        match (self, tag.repeat) {
            (TagLayout::Mixed, None) => true,
            (_, Some(r)) => REPEAT_RANGE.contains(&r),
            (TagLayout::Repeats, None) => false,
        }
    }
}

/// Column names split by side, ordered by tag then repeat
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnGroups {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl ColumnGroups {
    pub fn get(&self, side: Side) -> &[String] {
        match side {
            Side::Positive => &self.positive,
            Side::Negative => &self.negative,
        }
    }
}

/// Selects the tagged columns of a table and splits them into the negative
/// (tag < 32) and positive (tag > 32) groups.
///
/// # Arguments
/// * `table` - Name of the table, used in error messages
/// * `names` - Column names of the table
/// * `layout` - Naming scheme the tagged columns follow
///
/// # Errors
/// * `PlotError::AmbiguousColumn` if two names resolve to the same tag and repeat
/// * `PlotError::MissingColumns` if either side ends up empty
pub fn group_columns<S: AsRef<str>>(
    table: &str,
    names: &[S],
    layout: TagLayout,
) -> Result<ColumnGroups> {
    let mut tagged: BTreeMap<ColumnTag, &str> = BTreeMap::new();

    for name in names.iter().map(|name| name.as_ref()) {
        let Some(tag) = ColumnTag::parse(name).filter(|t| layout.accepts(t)) else {
            continue;
        };
        if let Some(first) = tagged.insert(tag, name) {
            return Err(PlotError::AmbiguousColumn {
                table: table.to_string(),
                first: first.to_string(),
                second: name.to_string(),
            });
        }
    }

    let mut groups = ColumnGroups::default();
    for (tag, name) in tagged {
        match tag.side() {
            Some(Side::Positive) => groups.positive.push(name.to_string()),
            Some(Side::Negative) => groups.negative.push(name.to_string()),
            None => {}
        }
    }

    for side in Side::ALL {
        if groups.get(side).is_empty() {
            return Err(PlotError::MissingColumns {
                table: table.to_string(),
                side: side.to_string(),
            });
        }
    }

    Ok(groups)
}
