#![allow(clippy::float_cmp)]

use carpool_core::{Bounds, Model, Sense};
use carpool_solver::Session;

use super::*;
use crate::samples::{scenario_a, scenario_b};
use crate::testing::{ScriptedSolver, structural_session};

fn build(instance: &ProblemInstance, options: &BuildOptions) -> (Session<ScriptedSolver>, BuiltModel) {
    let mut session = structural_session();
    let built = ModelBuilder::new(instance, options)
        .build(&mut session)
        .unwrap();
    (session, built)
}

fn bounds(model: &Model, var: VariableId) -> Bounds {
    model.variable(var).unwrap().bounds
}

fn row(model: &Model, name: &str) -> (Bounds, Vec<(VariableId, f64)>) {
    let id = model
        .constraint_by_name(name)
        .unwrap_or_else(|| panic!("missing row {name}"));
    (
        model.constraint(id).unwrap().bounds,
        model.rows()[id.index()].clone(),
    )
}

#[test]
fn variables_are_dense_and_named() {
    let instance = scenario_a().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let model = session.model();

    // travel and precedes: 4 * 4 * 1 each, load: 4 * 1, length: 1
    assert_eq!(model.num_variables(), 37);
    assert_eq!(built.report.variables, 37);
    assert_eq!(
        model.variable_by_name("0 travel From 2 To 0"),
        Some(built.variables.travel(2, 0, 0))
    );
    assert_eq!(
        model.variable_by_name("1 precedes 0 for 0"),
        Some(built.variables.precedes(1, 0, 0))
    );
    assert_eq!(
        model.variable_by_name("3-0 carLoad"),
        Some(built.variables.load(3, 0))
    );
    assert_eq!(
        model.variable_by_name("0 length"),
        Some(built.variables.length(0))
    );
}

#[test]
fn arena_offsets_are_distinct() {
    let instance = scenario_b().unwrap();
    let (_, built) = build(&instance, &BuildOptions::default());
    let vars = &built.variables;
    let nodes = instance.nodes();

    let mut seen = std::collections::BTreeSet::new();
    for i in nodes.nodes() {
        for j in nodes.nodes() {
            for k in 0..2 {
                assert!(seen.insert(vars.travel(i, j, k)));
                assert!(seen.insert(vars.precedes(i, j, k)));
            }
        }
        for k in 0..2 {
            assert!(seen.insert(vars.load(i, k)));
        }
    }
    assert_eq!(seen.len() + 2, vars.len());
}

#[test]
fn load_and_length_bounds_follow_node_load() {
    let instance = scenario_a().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let model = session.model();
    let vars = &built.variables;

    assert_eq!(bounds(model, vars.load(0, 0)), Bounds::new(1.0, 2.0));
    assert_eq!(bounds(model, vars.load(1, 0)), Bounds::new(0.0, 1.0));
    assert_eq!(bounds(model, vars.load(2, 0)), Bounds::new(0.0, 2.0));
    assert_eq!(bounds(model, vars.load(3, 0)), Bounds::new(0.0, 2.0));
    assert!(model.variable(vars.load(0, 0)).unwrap().is_integer);

    let length = model.variable(vars.length(0)).unwrap();
    assert_eq!(length.bounds, Bounds::new(0.0, 30.0));
    assert!(!length.is_integer);
}

#[test]
fn single_seat_pickups_are_full() {
    let instance = scenario_b().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let model = session.model();
    let nodes = instance.nodes();

    for k in 0..2 {
        assert_eq!(bounds(model, built.variables.load(nodes.pickup(1), k)), Bounds::fixed(1.0));
        assert_eq!(bounds(model, built.variables.load(nodes.dropoff(1), k)), Bounds::fixed(0.0));
    }
}

#[test]
fn forbidden_arcs_are_fixed_when_pruned() {
    let instance = scenario_b().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let model = session.model();
    let nodes = instance.nodes();

    for i in nodes.nodes() {
        for j in nodes.nodes() {
            for k in 0..2 {
                let arc = bounds(model, built.variables.travel(i, j, k));
                if nodes.is_forbidden_arc(i, j, k) {
                    assert_eq!(arc, Bounds::fixed(0.0), "arc {i}->{j} of {k}");
                } else {
                    assert_eq!(arc, Bounds::new(0.0, 1.0), "arc {i}->{j} of {k}");
                }
            }
        }
    }

    // terminals are private
    let foreign = built.variables.travel(nodes.origin(1), nodes.pickup(0), 0);
    assert_eq!(bounds(model, foreign), Bounds::fixed(0.0));
    let own = built.variables.travel(nodes.origin(0), nodes.pickup(0), 0);
    assert_eq!(bounds(model, own), Bounds::new(0.0, 1.0));
}

#[test]
fn dense_formulation_spells_out_forbidden_arcs() {
    let instance = scenario_a().unwrap();
    let (session, built) = build(&instance, &BuildOptions::dense());
    let model = session.model();

    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(bounds(model, built.variables.travel(i, j, 0)), Bounds::new(0.0, 1.0));
        }
    }
    let (row_bounds, terms) = row(model, "forbidden_3_0_0");
    assert_eq!(row_bounds, Bounds::fixed(0.0));
    assert_eq!(terms, vec![(built.variables.travel(3, 0, 0), 1.0)]);
}

#[test]
fn scenario_a_family_sizes() {
    let instance = scenario_a().unwrap();

    let (session, pruned) = build(&instance, &BuildOptions::default());
    let counts = pruned.report.counts;
    assert_eq!(counts.length_definition, FamilySize { rows: 1, fixed: 0 });
    assert_eq!(counts.pickup_once.rows, 1);
    assert_eq!(counts.pairing.rows, 1);
    assert_eq!(counts.origin_departure.rows, 1);
    assert_eq!(counts.destination_arrival.rows, 1);
    // 4 self-loops, 3 more into the origin, 2 more out of the destination
    assert_eq!(counts.forbidden_arcs, FamilySize { rows: 0, fixed: 9 });
    assert_eq!(counts.flow_conservation.rows, 2);
    assert_eq!(counts.load_consistency.rows, 7);
    assert_eq!(counts.precedence, FamilySize { rows: 3, fixed: 3 });
    assert_eq!(counts.total(), FamilySize { rows: 17, fixed: 12 });
    assert_eq!(session.model().num_constraints(), 17);

    let (session, dense) = build(&instance, &BuildOptions::dense());
    let counts = dense.report.counts;
    assert_eq!(counts.forbidden_arcs, FamilySize { rows: 9, fixed: 0 });
    assert_eq!(counts.load_consistency.rows, 16);
    // 1 drop-off row, 4 antisymmetry, 4 arc precedence, 8 successor, 8 betweenness
    assert_eq!(counts.precedence, FamilySize { rows: 25, fixed: 0 });
    assert_eq!(counts.total().rows, 57);
    assert_eq!(session.model().num_constraints(), 57);
}

#[test]
fn pruned_precedence_emits_one_row_per_cycle() {
    let instance = scenario_b().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let model = session.model();

    // per driver over 6 service nodes: 15 antisymmetry, 30 arc precedence,
    // 40 successor, 120 betweenness; 3 drop-off and 6 diagonal fixings
    assert_eq!(
        built.report.counts.precedence,
        FamilySize {
            rows: 410,
            fixed: 18
        }
    );
    assert!(model.constraint_by_name("successor_0_1_2_0").is_some());
    assert!(model.constraint_by_name("successor_1_2_0_0").is_none());
    assert!(model.constraint_by_name("successor_0_2_1_0").is_some());
    assert!(model.constraint_by_name("antisymmetry_1_0_1").is_none());
}

#[test]
fn length_row_weights_arcs_by_distance() {
    let instance = scenario_a().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let vars = &built.variables;

    let (row_bounds, terms) = row(session.model(), "length_0");
    assert_eq!(row_bounds, Bounds::fixed(0.0));
    assert!(terms.contains(&(vars.length(0), 1.0)));
    assert!(terms.contains(&(vars.travel(2, 0, 0), -10.0)));
    assert!(terms.contains(&(vars.travel(1, 3, 0), -1.0)));
    // one term per allowed arc plus the length itself
    assert_eq!(terms.len(), 8);
}

#[test]
fn load_row_matches_linearization() {
    let instance = scenario_a().unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    let vars = &built.variables;

    // load[2] + travel[2][0] + (1 - 2) <= load[0]
    let (row_bounds, terms) = row(session.model(), "load_2_0_0");
    assert_eq!(row_bounds, Bounds::new(f64::NEG_INFINITY, 1.0));
    assert!(terms.contains(&(vars.load(2, 0), 1.0)));
    assert!(terms.contains(&(vars.load(0, 0), -1.0)));
    assert!(terms.contains(&(vars.travel(2, 0, 0), 1.0)));
    assert!(session.model().constraint_by_name("load_0_2_0").is_none());
}

#[test]
fn objective_counts_every_allowed_arc() {
    let instance = scenario_a().unwrap();
    let (session, _) = build(&instance, &BuildOptions::default());
    let objective = session.model().objective();
    assert_eq!(objective.sense, Some(Sense::Maximize));
    assert_eq!(objective.terms.len(), 7);
    assert!(objective.terms.iter().all(|(_, coeff)| *coeff == 1.0));
    assert_eq!(session.model().objective_name(), Some(MODEL_NAME));

    let (session, _) = build(&instance, &BuildOptions::dense());
    assert_eq!(session.model().objective().terms.len(), 16);
}

#[test]
fn rebuilding_yields_identical_models() {
    let instance = scenario_b().unwrap();
    for options in [BuildOptions::default(), BuildOptions::dense()] {
        let (first, _) = build(&instance, &options);
        let (second, _) = build(&instance, &options);
        assert_eq!(first.model().snapshot(), second.model().snapshot());
    }
}

#[test]
fn families_can_be_emitted_alone() {
    let instance = scenario_b().unwrap();
    let options = BuildOptions::default();
    let builder = ModelBuilder::new(&instance, &options);
    let mut session = structural_session();
    let vars = builder.declare_variables(&mut session).unwrap();

    let size = builder.flow_conservation(&mut session, &vars).unwrap();
    assert_eq!(size.rows, 12);
    assert_eq!(session.model().num_constraints(), 12);
    assert!(session.model().objective().sense.is_none());
}

#[test]
fn empty_instance_builds_an_empty_model() {
    let instance = ProblemInstance::new(0, 0, vec![], vec![], vec![]).unwrap();
    let (session, built) = build(&instance, &BuildOptions::default());
    assert!(built.variables.is_empty());
    assert_eq!(session.model().num_constraints(), 0);
    assert_eq!(session.model().objective().sense, Some(Sense::Maximize));
}
