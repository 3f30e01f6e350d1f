//! Property tests for the never-empty guarantee and checked access.

use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;

use unionvariant::{Variant, VariantError, Visit, Visitor};

type Triple = Variant<(u32, String, Vec<u8>)>;

/// Plain enum mirror of what the variant should hold.
#[derive(Debug, Clone, PartialEq)]
enum Model {
    Number(u32),
    Text(String),
    Bytes(Vec<u8>),
}

impl Model {
    fn which(&self) -> usize {
        match self {
            Model::Number(_) => 0,
            Model::Text(_) => 1,
            Model::Bytes(_) => 2,
        }
    }
}

/// Rebuilds a model from the live alternative.
struct Snapshot;

impl Visitor for Snapshot {
    type Output = Model;
}

impl Visit<u32> for Snapshot {
    fn visit(&mut self, value: &u32) -> Model {
        Model::Number(*value)
    }
}

impl Visit<String> for Snapshot {
    fn visit(&mut self, value: &String) -> Model {
        Model::Text(value.clone())
    }
}

impl Visit<Vec<u8>> for Snapshot {
    fn visit(&mut self, value: &Vec<u8>) -> Model {
        Model::Bytes(value.clone())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Number(u32),
    Text(String),
    Bytes(Vec<u8>),
    /// A fallible construction of a `String`, failing when the flag is set.
    TryText(String, bool),
    /// A construction of `Vec<u8>` that panics.
    PanicBytes,
    /// Replace with a clone of another variant.
    CloneFrom(Model),
}

fn model_strategy() -> impl Strategy<Value = Model> {
    prop_oneof![
        any::<u32>().prop_map(Model::Number),
        "[a-z]{0,8}".prop_map(Model::Text),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Model::Bytes),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u32>().prop_map(Op::Number),
        "[a-z]{0,8}".prop_map(Op::Text),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Op::Bytes),
        ("[a-z]{0,8}", any::<bool>()).prop_map(|(text, fail)| Op::TryText(text, fail)),
        Just(Op::PanicBytes),
        model_strategy().prop_map(Op::CloneFrom),
    ]
}

fn build(model: &Model) -> Triple {
    match model {
        Model::Number(n) => Variant::new(*n),
        Model::Text(s) => Variant::new(s.clone()),
        Model::Bytes(b) => Variant::new(b.clone()),
    }
}

/// Applies `op` to both sides, returning the model expected afterwards.
fn step(variant: &mut Triple, model: Model, op: Op) -> Model {
    match op {
        Op::Number(n) => {
            variant.emplace(n);
            Model::Number(n)
        }
        Op::Text(s) => {
            variant.emplace_with(|| s.clone());
            Model::Text(s)
        }
        Op::Bytes(b) => {
            variant.emplace(b.clone());
            Model::Bytes(b)
        }
        Op::TryText(s, fail) => {
            let result = variant.try_emplace_with(|| if fail { Err("refused") } else { Ok(s.clone()) });
            match result {
                Ok(_) => Model::Text(s),
                Err(VariantError::ConstructionFailed { index, cause }) => {
                    assert_eq!(index, 1);
                    assert_eq!(cause, "refused");
                    model
                }
                Err(other) => panic!("unexpected error {}", other),
            }
        }
        Op::PanicBytes => {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                variant.emplace_with::<Vec<u8>, _, _>(|| panic!("no bytes today"));
            }));
            assert!(outcome.is_err());
            model
        }
        Op::CloneFrom(source) => {
            variant.clone_from(&build(&source));
            source
        }
    }
}

proptest! {
    #[test]
    fn never_empty_and_unchanged_on_failure(
        start in model_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let mut variant = build(&start);
        let mut model = start;

        for op in ops {
            model = step(&mut variant, model, op);

            prop_assert!(variant.which() < Triple::alternative_count());
            prop_assert_eq!(variant.which(), model.which());
            prop_assert_eq!(variant.apply(Snapshot), model.clone());
        }
    }

    #[test]
    fn checked_access_round_trips(model in model_strategy()) {
        let variant = build(&model);

        match &model {
            Model::Number(n) => {
                prop_assert_eq!(variant.get::<u32, _>(), Ok(n));
                prop_assert!(variant.get::<String, _>().is_err());
                prop_assert!(variant.get::<Vec<u8>, _>().is_err());
            }
            Model::Text(s) => {
                prop_assert_eq!(variant.get::<String, _>(), Ok(s));
                prop_assert!(variant.get::<u32, _>().is_err());
            }
            Model::Bytes(b) => {
                prop_assert_eq!(variant.get::<Vec<u8>, _>(), Ok(b));
                prop_assert!(variant.get::<String, _>().is_err());
            }
        }
    }

    #[test]
    fn dispatch_matches_direct_call(model in model_strategy()) {
        let variant = build(&model);

        let direct = match &model {
            Model::Number(n) => Snapshot.visit(n),
            Model::Text(s) => Snapshot.visit(s),
            Model::Bytes(b) => Snapshot.visit(b),
        };

        prop_assert_eq!(variant.apply(Snapshot), direct);
    }

    #[test]
    fn equality_follows_the_model(a in model_strategy(), b in model_strategy()) {
        prop_assert_eq!(build(&a) == build(&b), a == b);
    }
}
