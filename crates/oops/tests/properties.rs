use std::error::Error as StdError;
use std::sync::Arc;

use oops::{
    Annotation, Error, Label, Metadata, Nested, Presentation, Severity, Shape, SharedError,
    UNTAGGED, WrapAs, because, chain, find, metadata, oops, shared, tag,
};

const MESSAGES: &[&str] = &[
    "",
    "emit macho dwarf: elf header corrupted",
    "  leading and trailing  ",
    "unicode: ünïcødé ✓",
    "percent %s and braces {}",
];

fn io(text: &str) -> SharedError {
    shared(std::io::Error::other(text.to_string()))
}

#[derive(Debug)]
struct Upstream {
    service: &'static str,
    errors: Vec<SharedError>,
}

impl Metadata for Upstream {
    fn nested(&self) -> Nested<'_> {
        match self.errors.as_slice() {
            [] => Nested::None,
            [only] => Nested::One(&**only),
            many => Nested::Many(many.iter().map(|e| &**e as &(dyn StdError + 'static)).collect()),
        }
    }
}

#[test]
fn bare_message_round_trips_and_reaches_untagged() {
    for &msg in MESSAGES {
        let err = Error::new(msg, std::iter::empty());
        assert_eq!(err.to_string(), msg);
        assert_eq!(err.message(), msg);
        assert_eq!(err.shape(), Shape::Plain);
        assert!(err.is(&*UNTAGGED), "untagged must be reachable for {msg:?}");
    }
}

#[test]
fn explicit_label_replaces_untagged() {
    let labels = [
        Label::new("not implemented yet"),
        Label::new("something went wrong"),
        Label::new("unauthorized access"),
        Label::new("resource not found"),
    ];
    for label in &labels {
        let err = oops!("labelled", tag(label));
        assert!(err.is(label));
        assert!(!err.is(&*UNTAGGED));
        for other in labels.iter().filter(|other| *other != label) {
            assert!(!err.is(other));
        }
    }
}

#[test]
fn first_tag_wins() {
    let a = Label::new("a");
    let b = Label::new("b");
    let err = oops!("two tags", tag(&a), tag(&b));
    assert!(err.is(&a));
    assert!(!err.is(&b));
    assert_eq!(err.label(), Some(&a));
}

#[test]
fn untagged_tag_does_not_claim_the_slot() {
    let a = Label::new("a");
    let err = oops!("untagged first", tag(&UNTAGGED), tag(&a));
    assert_eq!(err.label(), Some(&a));
}

#[test]
fn causes_keep_supplied_order() {
    let causes: Vec<SharedError> = (0..5).map(|i| io(&format!("cause {i}"))).collect();
    let err = Error::new("many causes", causes.iter().cloned().map(because));

    let links = err.chain();
    assert_eq!(links.len(), causes.len() + 1);
    for (i, cause) in causes.iter().enumerate() {
        assert!(chain::same(links[i], &**cause), "cause {i} out of order");
        assert!(err.is(&**cause));
    }
    assert!(chain::same(links[causes.len()], &*UNTAGGED));
}

#[test]
fn absent_causes_are_dropped() {
    let c1 = io("c1");
    let c2 = io("c2");
    let err = Error::new(
        "gaps",
        [
            because(None::<SharedError>),
            because(c1.clone()),
            because(None::<SharedError>),
            because(c2.clone()),
            because(None::<SharedError>),
        ],
    );
    assert_eq!(err.causes().len(), 2);
    assert!(Arc::ptr_eq(&err.causes()[0], &c1));
    assert!(Arc::ptr_eq(&err.causes()[1], &c2));
}

#[test]
fn only_empty_causes_stay_plain() {
    let err = Error::new("nothing", [because(None::<SharedError>), Annotation::Marker]);
    assert_eq!(err.shape(), Shape::Plain);
    assert!(err.causes().is_empty());
}

#[test]
fn extraction_succeeds_after_one_wrap() {
    let label = Label::new("conflict");
    let built = [
        oops!("plain"),
        oops!("standard", tag(&label)),
        oops!("meta", metadata(Upstream { service: "billing", errors: Vec::new() })),
        oops!("rich", tag(&label), metadata(Upstream { service: "billing", errors: Vec::new() })),
    ];
    for err in built {
        let expected = err.shape();
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(err);
        let found = find::<Error>(&*boxed).expect("composed error");
        assert_eq!(found.shape(), expected);
    }
}

#[test]
fn nested_composed_errors_are_searchable() {
    let root = io("connection reset");
    let storage = Label::new("storage");
    let api = Label::new("api");
    let inner: SharedError = Arc::new(oops!("write failed", tag(&storage), because(root.clone())));
    let outer = oops!("request failed", because(inner.clone()), tag(&api));

    assert!(outer.is(&api));
    assert!(outer.is(&storage));
    assert!(outer.is(&*root));
    assert!(outer.is(&*inner));
    assert_eq!(
        find::<Error>(&*inner).map(Error::message),
        Some("write failed")
    );
}

#[test]
fn metadata_causes_are_reachable() {
    let one = io("one");
    let two = io("two");
    let three = io("three");

    let single = oops!("single", metadata(Upstream { service: "auth", errors: vec![one.clone()] }));
    assert_eq!(single.shape(), Shape::Meta);
    assert!(single.is(&*one));
    assert!(!single.is(&*UNTAGGED));

    let label = Label::new("unavailable");
    let rich = oops!(
        "many",
        metadata(Upstream {
            service: "auth",
            errors: vec![two.clone(), three.clone()],
        }),
        tag(&label),
        because(one.clone()),
    );
    let links = rich.chain();
    assert_eq!(links.len(), 4);
    assert!(chain::same(links[0], &*one));
    assert!(chain::same(links[1], &label));
    assert!(chain::same(links[2], &*two));
    assert!(chain::same(links[3], &*three));
    assert_eq!(rich.data::<Upstream>().map(|u| u.service), Some("auth"));
}

#[test]
fn first_metadata_wins_and_marker_is_ignored() {
    let err = oops!(
        "payloads",
        Annotation::Marker,
        Annotation::Metadata(None),
        metadata(Upstream { service: "first", errors: Vec::new() }),
        metadata(Upstream { service: "second", errors: Vec::new() }),
    );
    assert_eq!(err.data::<Upstream>().map(|u| u.service), Some("first"));
}

#[test]
fn last_diagnosis_wins() {
    let err = oops!(
        "diagnosed",
        Severity::Low.diag("first"),
        Severity::Critical.diag("second"),
    );
    assert_eq!(err.shape(), Shape::Standard);
    assert_eq!(err.diagnosis(), Some(&Severity::Critical.diag("second")));
    assert!(err.is(&*UNTAGGED));
}

#[test]
fn wrap_as_label_matches_the_wrapped_error() {
    let sentinel = io("record not found");
    let err = oops!("lookup", WrapAs::Label.wrap(sentinel.clone()));
    assert!(err.is(&*sentinel));
    assert!(err.is_tagged());
    assert_eq!(err.label().map(ToString::to_string).as_deref(), Some("record not found"));
}

#[test]
fn composed_error_used_as_label_keeps_every_cause_reachable() {
    let c1 = io("replica lagging");
    let c2 = io("primary unreachable");
    let inner: SharedError = Arc::new(oops!("write rejected", because(c1.clone()), because(c2.clone())));
    let outer = oops!("checkout failed", WrapAs::Label.wrap(inner.clone()));

    assert!(outer.is(&*inner));
    assert!(outer.is(&*c1));
    assert!(outer.is(&*c2));
    assert_eq!(outer.trace(10).len(), 4);

    let label = outer.label().expect("label");
    assert_eq!(find::<Error>(label).map(Error::message), Some("write rejected"));
    let composed: Vec<&str> = chain::walk(&outer)
        .filter_map(find::<Error>)
        .map(Error::message)
        .collect();
    assert_eq!(composed.first(), Some(&"checkout failed"));
    assert!(composed.contains(&"write rejected"));
}

#[test]
fn presentation_is_idempotent() {
    let label = Label::new("rate limited");
    let err = oops!(
        "slow down",
        tag(&label),
        because(io("429")),
        Severity::Medium.diag("client exceeded quota"),
        metadata(Upstream { service: "gateway", errors: Vec::new() }),
    );
    let first = Presentation::of(&err);
    let second = Presentation::of(&err);
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.label, "rate limited");
    assert_eq!(first.cause.as_deref(), Some("429"));
}

#[test]
fn composed_errors_are_shareable_across_threads() {
    let label = Label::new("shared");
    let cause = io("root");
    let err = Arc::new(oops!("read by many", tag(&label), because(cause.clone())));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let err = Arc::clone(&err);
            let label = label.clone();
            let cause = cause.clone();
            std::thread::spawn(move || err.is(&label) && err.is(&*cause))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("reader thread panicked"));
    }
}
