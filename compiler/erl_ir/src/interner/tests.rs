use super::*;
use pretty_assertions::assert_eq;

#[test]
fn fresh_interner_holds_pre_interned_names() {
    let interner = StringInterner::new();
    assert_eq!(interner.len(), Name::PRE_INTERNED.len());
    assert_eq!(interner.intern("erlang"), Name::ERLANG);
    assert_eq!(interner.lookup(Name::MODULE_INFO), "module_info");
}

#[test]
fn intern_and_lookup_round_trip() {
    let interner = StringInterner::new();
    let a = interner.intern("loop");
    let b = interner.intern("sum");
    assert_ne!(a, b);
    assert_eq!(interner.lookup(a), "loop");
    assert_eq!(interner.lookup(b), "sum");
    assert_eq!(interner.intern("loop"), a);
}

#[test]
fn len_counts_distinct_strings_only() {
    let interner = StringInterner::new();
    let before = interner.len();
    interner.intern("x");
    interner.intern("x");
    interner.intern("y");
    assert_eq!(interner.len(), before + 2);
    assert!(!interner.is_empty());
}

#[test]
fn unknown_name_resolves_to_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}

#[test]
fn concurrent_interning_agrees() {
    let interner = StringInterner::new();
    let names: Vec<Name> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| interner.intern("shared_atom")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| panic!("interner thread panicked")))
            .collect()
    });
    assert!(names.windows(2).all(|w| w[0] == w[1]));
}
