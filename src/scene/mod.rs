// scene/ - The cube arrangement the site ships with
//
// Two clusters flanking the content column. The single Middle cube is the
// one kept on phones.

use crate::viewport::{CubeSpec, Role, Side};

pub const DEFAULT_CUBES: [CubeSpec; 5] = [
    CubeSpec::new(Side::Left, -0.1, 0.0, 3.0, Role::Outer),
    CubeSpec::new(Side::Left, -1.5, -1.0, 3.0, Role::Outer),
    CubeSpec::new(Side::Left, -0.75, 5.0, 2.3, Role::Outer),
    CubeSpec::new(Side::Right, 0.0, -1.0, 3.2, Role::Middle),
    CubeSpec::new(Side::Right, 1.4, 3.0, 2.5, Role::Outer),
];
