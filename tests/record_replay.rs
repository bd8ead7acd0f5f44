// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Recording a sequence and replaying it must look exactly like issuing it directly.
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use irisobj::types::{Axis, BlendFactor, CurveType, IDENTITY, Primitive, ShadeModel};
use irisobj::{BackendCall, Gl, TraceBackend};

const YELLOW: u16 = 3;
const CYAN: u16 = 6;

/// Exercises every recordable entry point with argument shapes worth comparing.
fn scene(gl: &mut Gl<TraceBackend>) {
    gl.color(YELLOW);
    gl.cpack(0xff00ff00);
    gl.rgbcolor(255, 128, 0);
    gl.c3f(&[0.25, 0.5, 0.75]);
    gl.linewidth(2);
    gl.zbuffer(true);
    gl.shademodel(1);
    gl.backface(false);
    gl.writemask(0xfff);
    gl.zfunction(3);
    gl.blendfunction(4, 5);
    gl.font(2);
    gl.lmbind(1100, 1);
    gl.clear();
    gl.zclear();
    gl.czclear(0x00ff_ffff, 0x7fffff);

    gl.mmode(2);
    gl.pushmatrix();
    let mut skew = IDENTITY;
    skew[1][0] = 0.5;
    gl.loadmatrix(&skew);
    gl.multmatrix(&IDENTITY);
    gl.translate(1.0, 2.0, 3.0);
    gl.rotate(450, 'x');
    gl.rot(12.5, 'y');
    gl.scale(2.0, 2.0, 1.0);
    gl.popmatrix();
    gl.ortho2(-1.0, 1.0, -1.0, 1.0);
    gl.ortho(0.0, 640.0, 0.0, 480.0, -1.0, 1.0);
    gl.perspective(600, 1.25, 0.1, 100.0);
    gl.lookat(0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0);
    gl.polarview(10.0, 300, 450, 0);
    gl.viewport(0, 639, 0, 479);

    gl.rect(0.0, 0.0, 1.0, 1.0);
    gl.rectf(0.0, 0.0, 1.0, 1.0);
    gl.recti(0, 0, 10, 10);
    gl.rectfi(-5, -5, 5, 5);
    gl.r#move(0.0, 0.0, 0.0);
    gl.draw(1.0, 1.0, 1.0);
    gl.move2(0.5, 0.5);
    gl.draw2(-0.5, 0.5);
    gl.pnt(1.0, 0.0, 0.0);
    gl.pnt2(0.0, 1.0);
    gl.circ(0.0, 0.0, 1.0);
    gl.circf(1.0, 1.0, 0.5);
    gl.arc(0.0, 0.0, 2.0, 0, 900);
    gl.arcf(0.0, 0.0, 2.0, 900, 1800);
    gl.poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    gl.polf(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]);
    gl.poly2(&[[0.0, 0.0], [2.0, 0.0]]);
    gl.polf2(&[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0]]);
    gl.bgnpolygon();
    gl.n3f(&[0.0, 0.0, 1.0]);
    gl.v3f(&[0.0, 0.0, 0.0]);
    gl.v3f(&[1.0, 0.0, 0.0]);
    gl.v2f(&[1.0, 1.0]);
    gl.endpolygon();
    gl.bgnline();
    gl.v2f(&[0.0, 0.0]);
    gl.endline();

    gl.cmov(0.0, 0.0, 0.0);
    gl.cmov2(10.0, 10.0);
    gl.charstr("Hello, world");

    gl.curvebasis(1);
    gl.curveprecision(20);
    gl.crv(&[
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [2.0, 1.0, 0.0],
        [3.0, 0.0, 0.0],
    ]);
    gl.bgncurve();
    gl.nurbscurve(
        &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        32,
        &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 1.0],
        3,
        0x51,
    );
    gl.endcurve();
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn replay_matches_direct_execution() {
    let mut direct = Gl::new(TraceBackend::new());
    scene(&mut direct);

    let mut recorded = Gl::new(TraceBackend::new());
    recorded.makeobj(1);
    scene(&mut recorded);
    recorded.closeobj();
    assert!(recorded.backend().calls().is_empty());
    recorded.callobj(1);

    assert!(!direct.backend().calls().is_empty());
    assert_eq!(direct.backend().calls(), recorded.backend().calls());
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn replay_is_repeatable() {
    let mut gl = Gl::new(TraceBackend::new());
    gl.makeobj(1);
    scene(&mut gl);
    gl.closeobj();
    gl.callobj(1);
    let first = gl.backend_mut().take_calls();
    gl.callobj(1);
    assert_eq!(first, gl.backend().calls());
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn recorded_arguments_are_copies() {
    let mut gl = Gl::new(TraceBackend::new());
    let mut points = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
    let mut label = String::from("before");
    gl.makeobj(1);
    gl.polf2(&points);
    gl.charstr(&label);
    gl.closeobj();
    points[0] = [9.0, 9.0];
    label.clear();
    label.push_str("after");
    gl.callobj(1);
    assert_eq!(
        gl.backend().calls(),
        &[
            BackendCall::Polf2(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
            BackendCall::Charstr("before".to_owned()),
        ]
    );
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn yellow_rectangle() {
    let mut gl = Gl::new(TraceBackend::new());
    gl.makeobj(1);
    gl.color(YELLOW);
    gl.rectf(0.0, 0.0, 1.0, 1.0);
    gl.closeobj();
    gl.callobj(1);
    assert_eq!(
        gl.backend().calls(),
        &[
            BackendCall::Color(YELLOW),
            BackendCall::Rectf(0.0, 0.0, 1.0, 1.0),
        ]
    );
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn replace_from_start_discards_the_old_contents() {
    let mut gl = Gl::new(TraceBackend::new());
    gl.makeobj(1);
    gl.rectf(0.0, 0.0, 1.0, 1.0);
    gl.closeobj();
    gl.editobj(1);
    gl.objreplace(irisobj::STARTTAG);
    gl.color(CYAN);
    gl.rectf(-1.0, -1.0, 1.0, 1.0);
    gl.closeobj();
    gl.callobj(1);
    assert_eq!(
        gl.backend().calls(),
        &[
            BackendCall::Color(CYAN),
            BackendCall::Rectf(-1.0, -1.0, 1.0, 1.0),
        ]
    );
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn typed_arguments_survive_the_tape() {
    let mut gl = Gl::new(TraceBackend::new());
    gl.makeobj(1);
    gl.shademodel(0);
    gl.blendfunction(1, 0);
    gl.rotate(-900, 'Z');
    gl.bgnclosedline();
    gl.endclosedline();
    gl.nurbscurve(&[0.0, 0.0, 1.0, 1.0], 24, &[0.0; 6], 2, 0x4c);
    gl.closeobj();
    gl.callobj(1);
    assert_eq!(
        gl.backend().calls(),
        &[
            BackendCall::ShadeModel(ShadeModel::Flat),
            BackendCall::BlendFunction(BlendFactor::One, BlendFactor::Zero),
            BackendCall::Rotate(-900, Axis::Z),
            BackendCall::Begin(Primitive::ClosedLine),
            BackendCall::End(Primitive::ClosedLine),
            BackendCall::NurbsCurve {
                knots: vec![0.0, 0.0, 1.0, 1.0],
                stride: 24,
                control_points: vec![0.0; 6],
                order: 2,
                kind: CurveType::V3d,
            },
        ]
    );
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn replay_updates_backend_state() {
    let mut gl = Gl::new(TraceBackend::new());
    gl.makeobj(1);
    gl.mmode(1);
    gl.translate(4.0, 5.0, 6.0);
    gl.viewport(0, 99, 0, 49);
    gl.closeobj();
    gl.callobj(1);
    assert_eq!(gl.getmmode(), irisobj::types::MatrixMode::Projection);
    assert_eq!(gl.getmatrix()[3], [4.0, 5.0, 6.0, 1.0]);
    assert_eq!(gl.getviewport(), (0, 99, 0, 49));
}
