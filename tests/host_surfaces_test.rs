//! The C ABI and the scripted simulator must agree with the Rust API.

use harvester::core::{Engine, EngineConfig, WireGrid};
use harvester::ffi::{
    harvester_engine_free, harvester_engine_new, harvester_glyph_matrix_free,
    harvester_initialize, harvester_render, harvester_reset, harvester_step, HarvesterGlyph,
    HarvesterGlyphMatrix, HARVESTER_OK,
};
use harvester::types::ControlInput;

fn flags(input: ControlInput) -> [i32; 4] {
    [input.thrust, input.brake, input.left, input.right].map(i32::from)
}

fn pattern(i: u32) -> ControlInput {
    ControlInput {
        thrust: i < 40,
        brake: i >= 70,
        left: (10..20).contains(&i),
        right: false,
    }
}

#[test]
fn ffi_matches_rust_api() {
    let mut engine = Engine::new();
    engine.initialize(64, 20).unwrap();

    let handle = harvester_engine_new();
    unsafe {
        assert_eq!(harvester_initialize(handle, 64, 20), HARVESTER_OK);
    }

    for i in 0..90 {
        let input = pattern(i);
        engine.step(1.0 / 60.0, input).unwrap();
        let [t, b, l, r] = flags(input);
        assert_eq!(unsafe { harvester_step(handle, 1.0 / 60.0, t, b, l, r) }, HARVESTER_OK);
    }

    let expected: Vec<HarvesterGlyph> = engine
        .render()
        .unwrap()
        .cells()
        .iter()
        .map(HarvesterGlyph::from)
        .collect();

    let mut matrix = HarvesterGlyphMatrix::EMPTY;
    assert_eq!(unsafe { harvester_render(handle, &mut matrix) }, HARVESTER_OK);
    let got = unsafe { std::slice::from_raw_parts(matrix.glyphs, matrix.count as usize) };
    assert_eq!(got, expected.as_slice());

    unsafe {
        harvester_glyph_matrix_free(matrix);
        assert_eq!(harvester_reset(handle), HARVESTER_OK);
        assert_eq!(harvester_initialize(handle, 10, 5), HARVESTER_OK);
        harvester_engine_free(handle);
    }
}

#[test]
fn sim_script_matches_manual_run() {
    let script = r#"{
        "seed": 9,
        "width": 50,
        "height": 16,
        "steps": [
            { "thrust": true, "ticks": 40 },
            { "left": true, "thrust": true, "ticks": 10 },
            { "brake": true, "ticks": 20 }
        ]
    }"#;
    let out = harvester::sim::run_json(script, 1).unwrap();
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();

    let mut engine = Engine::with_config(EngineConfig::default().with_seed(9));
    engine.initialize(50, 16).unwrap();
    let segments = [
        (ControlInput { thrust: true, ..ControlInput::IDLE }, 40),
        (ControlInput { thrust: true, left: true, ..ControlInput::IDLE }, 10),
        (ControlInput { brake: true, ..ControlInput::IDLE }, 20),
    ];
    for (input, ticks) in segments {
        for _ in 0..ticks {
            engine.step(1.0 / 60.0, input).unwrap();
        }
    }

    let grid: WireGrid = serde_json::from_value(report["grid"].clone()).unwrap();
    assert_eq!(grid, WireGrid::from(&engine.render().unwrap()));
    assert_eq!(report["snapshot"]["ticks"], 70);
    assert_eq!(
        report["snapshot"]["fuel"].as_f64().unwrap(),
        engine.snapshot().unwrap().fuel
    );
}
