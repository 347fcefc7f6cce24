//! Conversion of polygons into triangles.

/// Split a convex polygon into triangles sharing its first vertex.
///
/// An `n`-gon yields `n - 2` triangles: `(p₀, pᵢ, pᵢ₊₁)` for `i ∈ 1..n-1`, in winding order.
/// Polygons with fewer than 3 vertices yield nothing.
pub fn fan<Idx: Copy>(polygon: &[Idx]) -> impl Iterator<Item = [Idx; 3]> + '_ {
    polygon
        .split_first()
        .into_iter()
        .flat_map(|(&first, rest)| rest.windows(2).map(move |w| [first, w[0], w[1]]))
}
