use approx::assert_relative_eq;

use mechsim::error::ParameterError;
use mechsim::simulation::base::Simulation;
use mechsim::simulation::engine::{BoundsPolicy, Engine};
use mechsim::simulation::integrator::{EulerModel, Termination};
use mechsim::simulation::params::{changes, ParamValue};
use mechsim::simulation::states::StateVector;
use mechsim::variants::{self, scattering, slope};
use mechsim::{
    DampedOscillator, ObjectOffSlope, ParticleOffSlope, Playback, Scattering, Scenario, ScenarioConfig,
    ScenarioError, Shape, TwoSprings,
};

/// Engine with a smaller step cap, everything else default
pub fn capped_engine(max_steps: usize) -> Engine {
    Engine { max_steps, ..Engine::default() }
}

/// Run a simulation from fresh initial conditions, return the row count
pub fn run(sim: &mut dyn Simulation) -> usize {
    let initial = sim.initial_conditions();
    sim.simulate(&initial).len()
}

// ==================================================================================
// Shared contract
// ==================================================================================

#[test]
fn first_row_is_the_initial_condition() {
    for (key, mut sim) in variants::build_all(Engine::default()) {
        let initial = sim.initial_conditions();
        let trajectory = sim.simulate(&initial);
        assert_eq!(trajectory.first(), &initial, "{key}: first row differs from initial state");
        assert_eq!(trajectory.dim(), sim.state_length(), "{key}: wrong state length");
    }
}

#[test]
fn trajectory_never_exceeds_the_step_cap() {
    for (key, mut sim) in variants::build_all(capped_engine(40)) {
        let rows = run(sim.as_mut());
        assert!(rows <= 41, "{key}: {rows} rows for a cap of 40");
    }
}

#[test]
fn initial_conditions_reset_the_trajectory() {
    for (key, mut sim) in variants::build_all(capped_engine(200)) {
        run(sim.as_mut());
        let initial = sim.initial_conditions();
        assert_eq!(sim.trajectory().len(), 1, "{key}");
        assert_eq!(sim.trajectory().first(), &initial, "{key}");
    }
}

#[test]
fn readings_clamp_past_the_last_frame() {
    for (key, mut sim) in variants::build_all(Engine::default()) {
        let figure = sim.get_figure();
        assert_eq!(figure.frame_count, sim.trajectory().len(), "{key}");

        sim.set_offset(figure.frame_count - 1);
        let last = sim.get_readings();
        sim.set_offset(figure.frame_count + 10_000);
        let beyond = sim.get_readings();

        assert_eq!(last, beyond, "{key}: readings past the end differ from the last frame");
        assert_eq!(
            sim.render_frame(figure.frame_count - 1),
            sim.render_frame(figure.frame_count + 10_000),
            "{key}"
        );
    }
}

#[test]
fn unknown_parameters_are_ignored() {
    let mut sim = DampedOscillator::default();
    let before = sim.params.clone();

    // the same edit a slope control would send
    assert!(sim.update_variables(&changes([("slope_angle", 80)])).is_ok());
    assert_eq!(sim.params, before);
}

#[test]
fn rejected_update_changes_nothing() {
    let mut sim = ObjectOffSlope::default();
    run(&mut sim);
    let rows = sim.trajectory().len();
    let before = sim.params.clone();

    let result = sim.update_variables(&changes([
        ("speed", ParamValue::Float(30.0)),
        ("mass", ParamValue::Bool(true)),
    ]));

    assert!(matches!(result, Err(ParameterError::TypeMismatch { .. })));
    assert_eq!(sim.params, before, "a rejected update must be atomic");
    assert_eq!(sim.trajectory().len(), rows, "a rejected update must keep the trajectory");
}

#[test]
fn enforced_bounds_reject_out_of_range_values() {
    let engine = Engine { bounds: BoundsPolicy::Enforce, ..Engine::default() };
    let mut sim = DampedOscillator::new(engine);

    let err = sim.update_variables(&changes([("start_angle", 120)])).unwrap_err();
    assert!(matches!(err, ParameterError::OutOfRange { ref name, .. } if name == "start_angle"));
    assert_eq!(sim.params.start_angle, 85);

    // advisory (default) takes the same value
    let mut sim = DampedOscillator::default();
    assert!(sim.update_variables(&changes([("start_angle", 120)])).is_ok());
    assert_eq!(sim.params.start_angle, 120);
}

#[test]
fn fields_follow_live_parameters() {
    let mut sim = ObjectOffSlope::default();
    sim.update_variables(&changes([("launch_angle", ParamValue::Float(60.7))])).unwrap();

    let fields = sim.get_fields();
    assert_eq!(fields.get("launch_angle").unwrap().value, ParamValue::Int(60));
    assert_eq!(fields.get("slope_angle").unwrap().value, ParamValue::Int(30));
    assert_eq!(fields.len(), 8);
}

#[test]
fn playback_drives_the_frame_offset() {
    let mut sim = ParticleOffSlope::default();
    let figure = sim.get_figure();
    let mut playback = Playback::new(&figure);

    let mut frames = 0;
    while let Some(shapes) = playback.tick(&mut sim) {
        assert_eq!(sim.offset(), frames);
        assert!(matches!(shapes[0], Shape::Marker { .. }));
        frames += 1;
    }

    assert_eq!(frames, figure.frame_count);
    assert!(playback.is_finished());
    assert!(playback.tick(&mut sim).is_none());
}

#[test]
fn registry_keys_are_unique_and_buildable() {
    let keys: Vec<&str> = variants::keys().collect();
    assert_eq!(keys.len(), 5);
    for key in &keys {
        assert_eq!(keys.iter().filter(|k| *k == key).count(), 1);
        assert!(variants::build(key, Engine::default()).is_some());
    }
    assert!(variants::build("triple_pendulum", Engine::default()).is_none());
}

// ==================================================================================
// Damped oscillator
// ==================================================================================

#[test]
fn damped_oscillator_settles_before_the_cap() {
    let mut sim = DampedOscillator::default();
    let rows = run(&mut sim);

    assert!(matches!(sim.termination(), Some(Termination::Condition { .. })));
    assert!(rows < sim.engine().max_steps + 1);
}

#[test]
fn undamped_pendulum_runs_to_the_cap() {
    let mut sim = DampedOscillator::new(capped_engine(2_000));
    sim.update_variables(&changes([("damping", 0.0)])).unwrap();

    assert_eq!(run(&mut sim), 2_001);
    assert_eq!(sim.termination(), Some(Termination::StepCap));
}

#[test]
fn pendulum_updates_velocity_before_angle() {
    let mut sim = DampedOscillator::default();
    run(&mut sim);

    let p = &sim.params;
    let dt = sim.engine().dt();
    let theta0 = 85f64.to_radians();
    let omega1 = p.angular_acceleration(theta0, 0.0) * dt;
    let row = sim.trajectory().get(1).unwrap();

    assert_relative_eq!(row[1], omega1, epsilon = 1e-12);
    assert_relative_eq!(row[0], theta0 + omega1 * dt, epsilon = 1e-12);
}

#[test]
fn pendulum_readings_are_in_degrees() {
    let mut sim = DampedOscillator::default();
    sim.get_figure();
    sim.set_offset(0);

    let readings = sim.get_readings();
    assert_eq!(readings.get("theta"), Some(85.0));
    assert_eq!(readings.get("omega"), Some(0.0));
}

// ==================================================================================
// Object / particle off slope
// ==================================================================================

#[test]
fn vertical_velocity_matches_free_fall() {
    let mut sim = ObjectOffSlope::default();
    run(&mut sim);

    let g = sim.params.gravity;
    let sps = sim.engine().steps_per_second as f64;
    let first = sim.trajectory().first().clone();

    for (i, row) in sim.trajectory().iter().enumerate() {
        assert_relative_eq!(row[3], first[3] - g * i as f64 / sps, epsilon = 1e-9);
        assert_eq!(row[2], first[2], "horizontal velocity must not change without drag");
    }
}

#[test]
fn slope_update_resets_and_moves_the_boundary() {
    let mut sim = ObjectOffSlope::default();
    let shallow_rows = run(&mut sim);

    assert!(sim.update_variables(&changes([("slope_angle", 80)])).is_ok());
    assert_eq!(sim.trajectory().len(), 1);
    assert_eq!(sim.trajectory().first(), &StateVector::zeros(4));

    sim.get_figure();
    let gradient = slope::slope_gradient(80);
    for row in sim.trajectory().iter() {
        assert!(!slope::below_slope(gradient, row[0], row[1]));
    }

    // one more step from the last row lands below the 80 degree slope
    let flight = sim.params.flight();
    let mut next = sim.trajectory().last().clone();
    flight.step(&mut next, sim.engine().dt());
    assert!(flight.terminated(&next));

    assert!(sim.trajectory().len() > shallow_rows, "a steeper slope means a longer flight");
}

#[test]
fn air_resistance_shortens_the_flight() {
    let mut plain = ObjectOffSlope::default();
    run(&mut plain);

    let mut dragged = ObjectOffSlope::default();
    dragged.update_variables(&changes([("air_resistance", true)])).unwrap();
    run(&mut dragged);

    assert!(dragged.trajectory().last()[0] < plain.trajectory().last()[0]);
}

#[test]
fn particle_reports_its_speed() {
    let mut sim = ParticleOffSlope::default();
    sim.get_figure();
    sim.set_offset(10);

    let readings = sim.get_readings();
    let vx = readings.get("vx").unwrap();
    let vy = readings.get("vy").unwrap();
    assert_relative_eq!(readings.get("speed").unwrap(), vx.hypot(vy), epsilon = 1e-4);
}

#[test]
fn slope_figure_has_a_slope_backdrop() {
    let mut sim = ParticleOffSlope::default();
    let figure = sim.get_figure();

    assert_eq!(figure.backdrop.len(), 1);
    match &figure.backdrop[0] {
        Shape::Line { points } => assert_eq!(points.len(), 100),
        other => panic!("expected a slope line, got {:?}", other),
    }
    assert!(figure.equal_aspect);
}

// ==================================================================================
// Scattering
// ==================================================================================

#[test]
fn contact_redirects_both_particles() {
    let mut sim = Scattering::default();
    run(&mut sim);

    let p = sim.params.clone();
    let rows = sim.trajectory().rows();
    let contact = rows
        .iter()
        .position(|row| scattering::separation(row) < p.contact_distance())
        .expect("default parameters collide");

    for row in &rows[..contact] {
        assert_eq!((row[4], row[5], row[6], row[7]), (p.speed, 0.0, 0.0, 0.0));
    }

    let theta = p.b.atan2(p.r1 + p.r2);
    let ratio = p.mass1 / p.mass2;
    for row in &rows[contact..] {
        assert_relative_eq!(row[4], p.speed * theta.cos(), epsilon = 1e-12);
        assert_relative_eq!(row[5], p.speed * theta.sin(), epsilon = 1e-12);
        assert_relative_eq!(row[6], ratio * row[4], epsilon = 1e-12);
        assert_relative_eq!(row[7], -ratio * row[5], epsilon = 1e-12);
        assert_relative_eq!(row[4].hypot(row[5]), p.speed, epsilon = 1e-9);
    }
}

#[test]
fn wide_miss_keeps_straight_lines() {
    let mut sim = Scattering::default();
    sim.update_variables(&changes([("b", 8.0)])).unwrap();
    run(&mut sim);

    assert!(matches!(sim.termination(), Some(Termination::Condition { .. })));
    for row in sim.trajectory().iter() {
        assert_eq!((row[4], row[5], row[6], row[7]), (10.0, 0.0, 0.0, 0.0));
        assert_eq!(row[1], 8.0);
    }
}

#[test]
fn scattering_stays_inside_the_axis() {
    let mut sim = Scattering::default();
    run(&mut sim);

    let bound = sim.params.axis_size();
    for row in sim.trajectory().iter() {
        for slot in 0..4 {
            assert!(row[slot].abs() <= bound);
        }
    }
}

#[test]
fn scattering_angle_reading() {
    let mut sim = Scattering::default();
    sim.get_figure();
    sim.set_offset(usize::MAX);

    let readings = sim.get_readings();
    let expected = sim.params.b.atan2(sim.params.contact_distance()).to_degrees();
    assert_relative_eq!(readings.get("theta").unwrap(), expected, epsilon = 1e-4);
}

// ==================================================================================
// Two springs
// ==================================================================================

#[test]
fn short_springs_run_away() {
    let mut sim = TwoSprings::default();
    sim.update_variables(&changes([("spring_length", 1.0)])).unwrap();
    let rows = run(&mut sim);

    assert!(matches!(sim.termination(), Some(Termination::Condition { .. })));
    assert!(rows < sim.engine().max_steps + 1);
    let bound = sim.params.runaway_bound();
    for row in sim.trajectory().iter() {
        assert!(row[0].abs() <= bound && row[2].abs() <= bound);
    }
}

#[test]
fn springs_at_equilibrium_stay_put() {
    let mut sim = TwoSprings::new(capped_engine(1_000));
    let (y1, y2) = sim.params.equilibrium();
    let initial = StateVector::from_vec(vec![y1, 0.0, y2, 0.0]);
    sim.simulate(&initial);

    for row in sim.trajectory().iter() {
        assert_relative_eq!(row[0], y1, epsilon = 1e-6);
        assert_relative_eq!(row[2], y2, epsilon = 1e-6);
    }
}

#[test]
fn spring_frames_draw_two_springs_and_two_bobs() {
    let mut sim = TwoSprings::new(capped_engine(100));
    sim.get_figure();
    let shapes = sim.render_frame(0);

    assert_eq!(shapes.len(), 4);
    assert!(matches!(shapes[0], Shape::Line { .. }));
    assert!(matches!(shapes[3], Shape::Marker { at, .. } if at == [0.0, 20.0]));
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn scenario_applies_parameters_without_simulating() {
    let cfg = ScenarioConfig::from_yaml_str(
        "simulation: object_off_slope\nparameters:\n  slope_angle: 80\n  speed: 12\n",
    )
    .unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let sim = scenario.simulation;

    assert_eq!(sim.name(), "Launching an Object Off of a Slope");
    assert_eq!(sim.get_fields().get("slope_angle").unwrap().value, ParamValue::Int(80));
    assert_eq!(sim.get_fields().get("speed").unwrap().value, ParamValue::Float(12.0));
    assert_eq!(sim.trajectory().len(), 1);
}

#[test]
fn scenario_with_unknown_simulation_fails() {
    let cfg = ScenarioConfig::from_yaml_str("simulation: triple_pendulum\n").unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ScenarioError::UnknownSimulation(ref key)) if key == "triple_pendulum"
    ));
}

#[test]
fn shipped_scenarios_build() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for key in variants::keys() {
        let cfg = ScenarioConfig::from_path(dir.join(format!("{key}.yaml"))).unwrap();
        let scenario = Scenario::build_scenario(cfg).unwrap();
        assert_eq!(scenario.key, key);
    }
}
