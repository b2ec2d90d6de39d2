//! Chronological ordering of both logs.
//!
//! Keys are compared as raw strings, not numbers: `"10"` sorts before
//! `"9"`. Output files produced by earlier runs depend on this order, so
//! it must not be "fixed" into a numeric sort.

use crate::record::{BaseEntry, UpdateEntry};

/// Sort base entries ascending by `log_id`. Stable.
pub fn sort_base(base: &mut [BaseEntry]) {
    base.sort_by(|a, b| a.log_id().cmp(b.log_id()));
}

/// Sort update entries ascending by `ref_log_id`. Stable.
pub fn sort_updates(updates: &mut [UpdateEntry]) {
    updates.sort_by(|a, b| a.ref_log_id.cmp(&b.ref_log_id));
}

/// Sort both logs into reconciliation order.
pub fn sequence(
    mut base: Vec<BaseEntry>,
    mut updates: Vec<UpdateEntry>,
) -> (Vec<BaseEntry>, Vec<UpdateEntry>) {
    sort_base(&mut base);
    sort_updates(&mut updates);
    (base, updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MasterRecord;

    fn base(log_id: &str, tag: &str) -> BaseEntry {
        BaseEntry::new(MasterRecord {
            log_id: log_id.into(),
            employee_firstname: tag.into(),
            ..Default::default()
        })
    }

    fn update(ref_log_id: &str) -> UpdateEntry {
        UpdateEntry {
            ref_log_id: ref_log_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn keys_sort_as_strings_not_numbers() {
        let mut entries = vec![base("2", ""), base("10", ""), base("9", "")];
        sort_base(&mut entries);
        let keys: Vec<&str> = entries.iter().map(|b| b.log_id()).collect();
        assert_eq!(keys, vec!["10", "2", "9"]);
    }

    #[test]
    fn updates_sort_by_referenced_log_id() {
        let mut updates = vec![update("9"), update("2"), update("10")];
        sort_updates(&mut updates);
        let keys: Vec<&str> = updates.iter().map(|u| u.ref_log_id.as_str()).collect();
        assert_eq!(keys, vec!["10", "2", "9"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut entries = vec![base("5", "first"), base("1", "x"), base("5", "second")];
        sort_base(&mut entries);
        assert_eq!(entries[1].record().employee_firstname, "first");
        assert_eq!(entries[2].record().employee_firstname, "second");
    }

    #[test]
    fn sequence_sorts_both_logs() {
        let (b, u) = sequence(
            vec![base("b", ""), base("a", "")],
            vec![update("z"), update("c")],
        );
        assert_eq!(b[0].log_id(), "a");
        assert_eq!(u[0].ref_log_id, "c");
    }
}
