//! Axis conventions for encoded bone records

/// Component ordering used when writing bone records
///
/// `Native` keeps the source basis. `Alternate` is for skeletons whose bones
/// point down Y (the authoring tool's convention) while the runtime expects
/// bones along X: components are rotated one place so Y comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisConvention {
    Native,
    #[default]
    Alternate,
}

impl AxisConvention {
    pub fn from_alternate(alternate: bool) -> Self {
        if alternate {
            Self::Alternate
        } else {
            Self::Native
        }
    }

    /// Index of the bone's length axis in the source basis
    pub fn length_axis(self) -> usize {
        match self {
            Self::Native => 0,
            Self::Alternate => 1,
        }
    }

    /// Reorder a 3-vector into this convention
    pub fn permute_vec3(self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        match self {
            Self::Native => [x, y, z],
            Self::Alternate => [y, z, x],
        }
    }

    /// Reorder an `[x, y, z, w]` quaternion into this convention (w stays last)
    pub fn permute_quat(self, [x, y, z, w]: [f32; 4]) -> [f32; 4] {
        let [a, b, c] = self.permute_vec3([x, y, z]);
        [a, b, c, w]
    }
}
