//! Dimension Table
//!
//! Every shape in the cassette model is derived from this fixed set of
//! named measurements (millimetres). The values come from the device
//! schematics; they are set once at startup and never mutated.
//!
//! Derived offsets (platform top, chip centre height, slider poses) are
//! exposed as methods so the arithmetic lives in one place.

/// The full set of measurements parametrizing the cassette model.
///
/// Values must be mutually consistent: derived offsets assume the chip is
/// longer than twice the recess wall thickness and that the ports fit
/// inside the chip width. No validation is performed; inconsistent values
/// produce degenerate geometry downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    // -- Microchip --
    /// Chip length along the slide (X) axis.
    pub chip_length: f64,
    /// Chip width along Z.
    pub chip_width: f64,
    /// Chip height along Y.
    pub chip_height: f64,

    // -- Cassette base --
    /// Extra base length beyond the chip, split between both slider bays.
    pub slider_bay_length: f64,
    /// Height of the raised chip platform.
    pub chip_platform_height: f64,
    /// Height of the outer side walls.
    pub base_wall_height: f64,
    /// Top surface height of the T-slot rails.
    pub rail_top_y: f64,
    /// Thickness of the recess walls around the chip.
    pub wall_thickness: f64,
    /// Height of the recess walls around the chip.
    pub recess_wall_height: f64,
    /// Width of the cradle clearance notch in the end walls.
    pub cradle_clearance_width: f64,

    // -- Chip ports --
    /// Depth of the port funnel indentation into the chip end face.
    pub port_funnel_depth: f64,
    /// Width of the port throat (narrow end of the funnel).
    pub port_throat_width: f64,
    /// Width of the port opening (wide end of the funnel).
    pub port_opening_width: f64,

    // -- Interior channel (subtracted from the chip body) --
    /// Width of the lower, wide part of the channel cross-section.
    pub channel_lower_width: f64,
    /// Width of the upper, narrow part of the channel cross-section.
    pub channel_upper_width: f64,
    /// Height of the lower part of the channel cross-section.
    pub channel_lower_height: f64,
    /// Total height of the channel cross-section.
    pub channel_total_height: f64,
    /// Solid material left between the channel and the chip top surface.
    pub channel_top_cover: f64,

    // -- Top recess / glass lid --
    /// Depth of the recess cut into the chip top surface.
    pub recess_depth: f64,
    /// Thickness of the glass lid sheet sitting in the recess.
    pub glass_lid_thickness: f64,

    // -- Slider cart --
    /// Height of the slider main body.
    pub slider_body_height: f64,
    /// Length of the slider main body along X.
    pub slider_body_length: f64,
    /// Width of the needle cradle along X.
    pub cradle_width: f64,
    /// Length of the needle shaft.
    pub needle_shaft_length: f64,
    /// Needle shaft radius.
    pub needle_radius: f64,
    /// Clearance between needle tip and chip face in the exploded pose.
    pub needle_clearance: f64,

    // -- Top cap --
    /// Cap slab height.
    pub cap_height: f64,
    /// Y position of the cap in the exploded pose.
    pub cap_raised_y: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            chip_length: 26.5,
            chip_width: 10.409,
            chip_height: 1.325,

            slider_bay_length: 18.0,
            chip_platform_height: 2.5,
            base_wall_height: 4.1,
            rail_top_y: 0.5,
            wall_thickness: 1.0,
            recess_wall_height: 1.0,
            cradle_clearance_width: 4.0,

            port_funnel_depth: 0.1,
            port_throat_width: 0.4,
            port_opening_width: 1.0,

            channel_lower_width: 1.4,
            channel_upper_width: 0.4,
            channel_lower_height: 0.275,
            channel_total_height: 0.45,
            channel_top_cover: 0.6,

            recess_depth: 0.6,
            glass_lid_thickness: 0.05,

            slider_body_height: 1.0,
            slider_body_length: 5.0,
            cradle_width: 1.0,
            needle_shaft_length: 3.0,
            needle_radius: 0.20,
            needle_clearance: 1.0,

            cap_height: 2.0,
            cap_raised_y: 20.0,
        }
    }
}

impl Dimensions {
    /// Total base length: chip plus both slider bays.
    pub fn base_length(&self) -> f64 {
        self.chip_length + self.slider_bay_length
    }

    /// Half the chip length; the X coordinate of the chip end faces.
    pub fn chip_edge_x(&self) -> f64 {
        self.chip_length / 2.0
    }

    /// Y of the chip centre once seated on the platform.
    pub fn chip_center_y(&self) -> f64 {
        self.chip_platform_height + self.chip_height / 2.0
    }

    /// X of the cradle front face in slider-local coordinates.
    ///
    /// The cradle is centred on the slider origin, so its front face
    /// (the face toward the chip) sits half a cradle width behind it.
    pub fn cradle_front_face_local_x(&self) -> f64 {
        -self.cradle_width / 2.0
    }

    /// X of the needle tip in slider-local coordinates.
    ///
    /// The needle protrudes from the cradle front face toward the chip.
    pub fn needle_tip_local_x(&self) -> f64 {
        self.cradle_front_face_local_x() - self.needle_shaft_length - 0.5
    }
}
