use hedron::{de::obj, Mesh};

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

/// Ensure that Meshes can compile with any unsigned index type with width <= `size_of::`<usize>
#[test]
#[allow(clippy::just_underscores_and_digits)]
fn mesh_index() {
    let _8 = Mesh::<f64, u8>::empty();
    let _16 = Mesh::<f64, u16>::empty();
    #[cfg(not(target_pointer_width = "16"))]
    {
        // size_of::<usize>() > 16
        let _32 = Mesh::<f64, u32>::empty();
        #[cfg(not(target_pointer_width = "32"))]
        {
            // size_of::<usize>() > 32
            let _64 = Mesh::<f64, u64>::empty();
        }
    }
    let _size = Mesh::<f64, usize>::empty();
}

/// Ensure that the OBJ reader works for each coordinate & index type
#[test]
fn obj_generic() {
    let options = obj::ObjOptions::default();
    assert_eq!(obj::parse::<f32, u8>(TRIANGLE, &options).unwrap().triangles(), &[[0, 1, 2]]);
    assert_eq!(obj::parse::<f64, u64>(TRIANGLE, &options).unwrap().triangles(), &[[0, 1, 2]]);
    assert_eq!(obj::parse::<f32, usize>(TRIANGLE, &options).unwrap().triangles(), &[[0, 1, 2]]);
}
