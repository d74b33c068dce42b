//! Spatial analysis instruction sent to the vision model together with the
//! floorplan image.
//!
//! The open-concept question is asked explicitly: the render stage must not
//! guess at wall removal, so the analysis has to state what is and is not
//! open concept in so many words.

/// Fixed instruction text for the analysis model.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this architectural floorplan and provide a detailed spatial description.

Extract and describe:
1. ROOM LIST with approximate square footage
2. WALL LAYOUT and room adjacency
3. OPENINGS and door placements
4. WINDOWS, their positions, and probable facing directions
5. KITCHEN/BATH appliance and fixture positions
6. SPATIAL FLOW and how rooms connect

Be precise about what IS and IS NOT open concept."#;
