#![no_main]

use glam::Vec3;
use libfuzzer_sys::fuzz_target;
use track_path_engine::{SubMesh, build_mesh, build_path};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };

    // Je 12 Bytes ein Anker; nicht-endliche Werte verwerfen
    let anchors: Vec<Vec3> = rest
        .chunks_exact(12)
        .take(64)
        .map(|c| {
            let f = |i: usize| f32::from_le_bytes([c[i], c[i + 1], c[i + 2], c[i + 3]]);
            Vec3::new(f(0), f(4), f(8))
        })
        .filter(|v| v.is_finite() && v.abs().max_element() < 1.0e6)
        .collect();

    let closed = flags & 1 == 1;
    let Ok(path) = build_path(&anchors, closed) else {
        assert!(anchors.len() < 2);
        return;
    };

    let t = f32::from(flags >> 1) / 127.0;
    let _ = path.evaluate_normalized(t);
    let _ = path.closest_norm_param(anchors[0], 1.0e-3);

    let samples = usize::from(flags % 32) + 1;
    if let Ok(mesh) = build_mesh(&path, samples, 1.0, 0.5) {
        let count = mesh.vertex_count() as u32;
        for sub_mesh in SubMesh::ALL {
            assert!(mesh.triangles(sub_mesh).iter().all(|&i| i < count));
        }
    }
});
