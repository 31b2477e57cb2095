//! Integration tests on small closed networks.

use hn_core::{EntityId, celsius, kgps, m, pa, w};
use hn_network::{AssetKind, AssetVariant, Network};
use hn_solver::{Solver, SolverConfig, SolverError, assemble};

/// Closed loop: production supply -> pipe -> production return, with a
/// boundary pinning the supply-side pressure.
fn build_loop() -> (Network, EntityId, EntityId, EntityId) {
    let mut network = Network::new();
    let production = network.add_asset(AssetKind::Production, None).unwrap();
    let pipe = network.add_asset(AssetKind::Pipe, None).unwrap();
    let boundary = network.add_asset(AssetKind::Boundary, None).unwrap();

    // supply node joins production outlet, pipe inlet, and the boundary
    network.connect(production, 1, pipe, 0).unwrap();
    network.connect(boundary, 0, pipe, 0).unwrap();
    // return node joins pipe outlet and production inlet
    network.connect(pipe, 1, production, 0).unwrap();

    match network.asset_mut(production).unwrap() {
        AssetVariant::Production(p) => {
            p.set_mass_flow_rate(kgps(2.0)).unwrap();
            p.set_supply_temperature(celsius(80.0));
        }
        _ => unreachable!(),
    }
    match network.asset_mut(pipe).unwrap() {
        AssetVariant::Pipe(p) => {
            // insulated pipe: the loop carries the supply temperature around
            p.set_geometry(m(500.0), m(0.2), m(1.0e-3));
        }
        _ => unreachable!(),
    }
    match network.asset_mut(boundary).unwrap() {
        AssetVariant::Boundary(b) => b.set_pressure(pa(5.0e5)),
        _ => unreachable!(),
    }
    (network, production, pipe, boundary)
}

#[test]
fn closed_loop_converges_within_bound() {
    let (mut network, production, pipe, boundary) = build_loop();
    let mut solver = Solver::default();
    let solution = solver.solve(&mut network).unwrap();
    assert!(
        solution.iterations <= 10,
        "took {} iterations",
        solution.iterations
    );

    let pipe_asset = network.asset(pipe).unwrap();
    let production_asset = network.asset(production).unwrap();
    let boundary_asset = network.asset(boundary).unwrap();

    // prescribed values hold
    assert!((boundary_asset.pressure(0) - 5.0e5).abs() < 1e-6);
    assert!((production_asset.mass_flow_rate(0) - 2.0).abs() < 1e-6);

    // mass is conserved through the pipe; the boundary carries none
    assert!((pipe_asset.mass_flow_rate(0) - 2.0).abs() < 1e-6);
    assert!((pipe_asset.mass_flow_rate(0) + pipe_asset.mass_flow_rate(1)).abs() < 1e-9);
    assert!(boundary_asset.mass_flow_rate(0).abs() < 1e-6);

    // pressure falls along the pipe and the production restores it
    assert!(pipe_asset.pressure(0) > pipe_asset.pressure(1));
    assert!(production_asset.pressure(1) > production_asset.pressure(0));

    // the insulated loop runs at the supply temperature throughout
    assert!((pipe_asset.temperature(0) - 353.15).abs() < 1e-6);
    assert!((pipe_asset.temperature(1) - 353.15).abs() < 1e-6);
    assert_eq!(pipe_asset.heat_supplied(), Some(0.0));

    // the scattered state satisfies every collected row
    network.prepare_iteration();
    let rows = network.equations().unwrap();
    assert_eq!(rows.len(), solution.x.len());
    for (i, row) in rows.iter().enumerate() {
        let residual = row.residual(&solution.x);
        assert!(residual.abs() < 1e-3, "row {i} residual {residual}");
    }
}

#[test]
fn assembly_is_idempotent() {
    let (mut network, ..) = build_loop();
    let unknowns = network.assign_indices();
    network.prepare_iteration();

    let rows_a = network.equations().unwrap();
    let rows_b = network.equations().unwrap();
    assert_eq!(rows_a, rows_b);

    let (a_1, b_1) = assemble(&rows_a, unknowns).unwrap();
    let (a_2, b_2) = assemble(&rows_b, unknowns).unwrap();
    assert_eq!(a_1, a_2);
    assert_eq!(b_1, b_2);
}

#[test]
fn iteration_cap_reports_last_iterate() {
    let (mut network, ..) = build_loop();
    let mut solver = Solver::new(SolverConfig {
        max_iterations: 1,
        ..SolverConfig::default()
    });
    let err = solver.solve(&mut network).unwrap_err();
    match err {
        SolverError::NotConverged {
            iterations,
            delta,
            last,
        } => {
            assert_eq!(iterations, 1);
            assert!(delta > 0.0);
            // the network keeps the last scattered iterate
            assert_eq!(network.gather_solution().unwrap(), last);
        }
        other => panic!("expected NotConverged, got {other}"),
    }
}

#[test]
fn two_boundaries_make_a_singular_system() {
    // Two prescribed-pressure boundaries on one node leave the shared
    // discharge split undetermined.
    let mut network = Network::new();
    let b_1 = network.add_asset(AssetKind::Boundary, None).unwrap();
    let b_2 = network.add_asset(AssetKind::Boundary, None).unwrap();
    network.connect(b_1, 0, b_2, 0).unwrap();

    let mut solver = Solver::default();
    let err = solver.solve(&mut network).unwrap_err();
    assert!(matches!(
        err,
        SolverError::SingularMatrix | SolverError::NonFinite { .. }
    ));
}

#[test]
fn stagnant_line_settles_at_fallback_temperature() {
    // boundary -- fall -- boundary with equal pressures: no flow, and
    // every junction pins its energy to the fallback state.
    let mut network = Network::new();
    let b_1 = network.add_asset(AssetKind::Boundary, None).unwrap();
    let fall = network.add_asset(AssetKind::Fall, None).unwrap();
    let b_2 = network.add_asset(AssetKind::Boundary, None).unwrap();
    network.connect(b_1, 0, fall, 0).unwrap();
    network.connect(fall, 1, b_2, 0).unwrap();

    for id in [b_1, b_2] {
        match network.asset_mut(id).unwrap() {
            AssetVariant::Boundary(b) => b.set_pressure(pa(1.0e5)),
            _ => unreachable!(),
        }
    }
    match network.asset_mut(fall).unwrap() {
        AssetVariant::Fall(f) => f.set_resistance(50.0),
        _ => unreachable!(),
    }

    let mut solver = Solver::default();
    let solution = solver.solve(&mut network).unwrap();
    assert!(solution.iterations <= 3);

    let fall_asset = network.asset(fall).unwrap();
    assert!(fall_asset.mass_flow_rate(0).abs() < 1e-9);
    assert!((fall_asset.temperature(0) - 300.0).abs() < 1e-6);
    assert!((fall_asset.temperature(1) - 300.0).abs() < 1e-6);
}

#[test]
fn heat_demand_cools_the_flow() {
    // boundary (6 bar, 80 degC) -- fall (demand) -- boundary (5 bar):
    // 1 kg/s through the resistance, cooled by the prescribed demand.
    let mut network = Network::new();
    let feed = network.add_asset(AssetKind::Boundary, None).unwrap();
    let demand = network.add_asset(AssetKind::Fall, None).unwrap();
    let sink = network.add_asset(AssetKind::Boundary, None).unwrap();
    network.connect(feed, 0, demand, 0).unwrap();
    network.connect(demand, 1, sink, 0).unwrap();

    match network.asset_mut(feed).unwrap() {
        AssetVariant::Boundary(b) => {
            b.set_pressure(pa(6.0e5));
            b.set_temperature(celsius(80.0));
        }
        _ => unreachable!(),
    }
    match network.asset_mut(sink).unwrap() {
        AssetVariant::Boundary(b) => b.set_pressure(pa(5.0e5)),
        _ => unreachable!(),
    }
    match network.asset_mut(demand).unwrap() {
        AssetVariant::Fall(f) => {
            f.set_resistance(1.0e5);
            f.set_heat_flux(w(-1.0e5));
        }
        _ => unreachable!(),
    }

    let mut solver = Solver::default();
    let solution = solver.solve(&mut network).unwrap();
    assert!(solution.iterations <= 10);

    let demand_asset = network.asset(demand).unwrap();
    // (6e5 - 5e5) Pa / 1e5 Pa/(kg/s) = 1 kg/s
    assert!((demand_asset.mass_flow_rate(0) - 1.0).abs() < 1e-6);
    // inlet at the feed temperature
    assert!((demand_asset.temperature(0) - 353.15).abs() < 1e-6);
    // 1e5 W removed from 1 kg/s drops the internal energy by 1e5 J/kg
    assert!((demand_asset.temperature(1) - 329.2767).abs() < 0.01);
}
