//! Minimal fixed-function matrix math for the render loop.
//!
//! Matrices are `[f32; 16]` in row-major order. GLES 2.0 does not support
//! transposed uniform uploads, so callers convert to column-major with
//! [`mat4x4_transpose`] right before the upload.

pub type Mat4x4 = [f32; 16];

pub fn mat4x4_identity() -> Mat4x4 {
    [
      1.0, 0.0, 0.0, 0.0,
      0.0, 1.0, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_transpose(matrix: Mat4x4) -> Mat4x4 {
    let mut ret = [0.0; 16];
    for i in 0..16 {
        let row = i / 4;
        let col = i % 4;
        ret[col * 4 + row] = matrix[row * 4 + col];
    }
    ret
}

pub fn vec4_dot(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

pub fn mat4x4_row(mat: &Mat4x4, row: usize) -> [f32; 4] {
    let start_idx = row * 4;
    [mat[start_idx], mat[start_idx + 1], mat[start_idx + 2], mat[start_idx + 3]]
}

pub fn mat4x4_col(mat: &Mat4x4, col: usize) -> [f32; 4] {
    [mat[col], mat[4 + col], mat[8 + col], mat[12 + col]]
}

pub fn mat4x4_mul(a: Mat4x4, b: Mat4x4) -> Mat4x4 {
    let mut ret = [0.0; 16];
    for i in 0..16 {
        let row = i / 4;
        let col = i % 4;
        let a_row = mat4x4_row(&a, row);
        let b_col = mat4x4_col(&b, col);
        ret[i] = vec4_dot(a_row, b_col);
    }
    ret
}

/// Apply `mat` to the point `(x, y, z, 1)`.
pub fn mat4x4_transform_point(mat: &Mat4x4, point: [f32; 3]) -> [f32; 4] {
    let v = [point[0], point[1], point[2], 1.0];
    [
        vec4_dot(mat4x4_row(mat, 0), v),
        vec4_dot(mat4x4_row(mat, 1), v),
        vec4_dot(mat4x4_row(mat, 2), v),
        vec4_dot(mat4x4_row(mat, 3), v),
    ]
}

/// Perspective projection defined by a view frustum, GL convention.
pub fn mat4x4_frustum(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4x4 {
    let rl = right - left;
    let tb = top - bottom;
    let fnr = far - near;

    [
        2.0 * near / rl, 0.0,             (right + left) / rl,  0.0,
        0.0,             2.0 * near / tb, (top + bottom) / tb,  0.0,
        0.0,             0.0,             -(far + near) / fnr,  -2.0 * far * near / fnr,
        0.0,             0.0,             -1.0,                 0.0,
    ]
}

/// View matrix for a camera at `eye` looking at `center` with the given up
/// direction.
pub fn mat4x4_look_at(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> Mat4x4 {
    let forward = vec3_normalize([
        center[0] - eye[0],
        center[1] - eye[1],
        center[2] - eye[2],
    ]);
    let side = vec3_normalize(vec3_cross(forward, up));
    let up = vec3_cross(side, forward);

    [
        side[0],     side[1],     side[2],     -vec3_dot(side, eye),
        up[0],       up[1],       up[2],       -vec3_dot(up, eye),
        -forward[0], -forward[1], -forward[2], vec3_dot(forward, eye),
        0.0,         0.0,         0.0,         1.0,
    ]
}

fn vec3_dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn vec3_cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn vec3_normalize(v: [f32; 3]) -> [f32; 3] {
    let len = vec3_dot(v, v).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_vec4_close(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn identity_is_multiplicative_unit() {
        let m = mat4x4_frustum(-1.5, 1.5, -1.0, 1.0, 3.0, 7.0);
        assert_eq!(mat4x4_mul(mat4x4_identity(), m), m);
        assert_eq!(mat4x4_mul(m, mat4x4_identity()), m);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = mat4x4_frustum(-2.0, 1.0, -1.0, 1.0, 3.0, 7.0);
        let t = mat4x4_transpose(m);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(m[row * 4 + col], t[col * 4 + row]);
            }
        }
    }

    #[test]
    fn symmetric_frustum_matches_gl_reference() {
        let m = mat4x4_frustum(-2.0, 2.0, -1.0, 1.0, 3.0, 7.0);
        // Reference entries for the symmetric case: x scale n/r, y scale n/t,
        // depth row -(f+n)/(f-n) and -2fn/(f-n).
        assert!((m[0] - 1.5).abs() < EPS);
        assert!((m[5] - 3.0).abs() < EPS);
        assert!((m[10] - -2.5).abs() < EPS);
        assert!((m[11] - -10.5).abs() < EPS);
        assert!((m[14] - -1.0).abs() < EPS);
    }

    #[test]
    fn frustum_maps_near_plane_center_to_clip_origin() {
        let m = mat4x4_frustum(-1.0, 1.0, -1.0, 1.0, 3.0, 7.0);
        // A point on the near plane straight ahead of the camera.
        let clip = mat4x4_transform_point(&m, [0.0, 0.0, -3.0]);
        assert_vec4_close(
            [clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3], 1.0],
            [0.0, 0.0, -1.0, 1.0],
        );
    }

    #[test]
    fn look_at_places_target_in_front_of_camera() {
        let view = mat4x4_look_at([0.0, 0.0, -3.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // The origin is 3 units in front of the eye, so it lands at z = -3 in
        // view space (the camera looks down -z).
        let p = mat4x4_transform_point(&view, [0.0, 0.0, 0.0]);
        assert_vec4_close(p, [0.0, 0.0, -3.0, 1.0]);
        // The eye itself maps to the view-space origin.
        let e = mat4x4_transform_point(&view, [0.0, 0.0, -3.0]);
        assert_vec4_close(e, [0.0, 0.0, 0.0, 1.0]);
    }
}
