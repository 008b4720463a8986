//! Sizing engine: turns weights into section geometry.
//!
//! All functions here are pure. Extents are unit agnostic `f64` values;
//! [`to_cells`] maps them onto terminal cells.

/// Sizing input for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInput {
    /// Fixed extent of the title bar
    pub title_extent: f64,
    /// Whether the content region is visible
    pub expanded: bool,
    /// Relative weight among expanded sections
    pub weight: f64,
}

/// Computed geometry of one section along the layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionGeometry {
    /// Offset of the title bar from the container start
    pub offset: f64,
    pub title_extent: f64,
    pub content_extent: f64,
}

impl SectionGeometry {
    /// Title plus content extent.
    pub fn extent(&self) -> f64 {
        self.title_extent + self.content_extent
    }

    /// Offset of the content region from the container start.
    pub fn content_offset(&self) -> f64 {
        self.offset + self.title_extent
    }
}

/// Geometry of one section snapped to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSpan {
    pub offset: u16,
    pub title_extent: u16,
    pub content_extent: u16,
}

/// Space taken by title bars and gaps, independent of weights.
pub fn fixed_overhead(spacing: f64, sections: &[SizingInput]) -> f64 {
    let titles: f64 = sections.iter().map(|s| s.title_extent.max(0.0)).sum();
    titles + spacing.max(0.0) * sections.len().saturating_sub(1) as f64
}

/// Space left for content regions.
pub fn available_content(container_extent: f64, spacing: f64, sections: &[SizingInput]) -> f64 {
    if container_extent.is_nan() || container_extent <= 0.0 {
        return 0.0;
    }
    (container_extent - fixed_overhead(spacing, sections)).max(0.0)
}

/// Weights rescaled to sum to 1 over the entries where `mask` is true.
///
/// Masked-out entries become 0. Negative or non-finite weights count as 0;
/// if nothing positive remains, the masked entries share equally.
pub fn normalize(weights: &[f64], mask: &[bool]) -> Vec<f64> {
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let active = mask.iter().filter(|m| **m).count();
    let sum: f64 = weights
        .iter()
        .zip(mask)
        .filter(|(_, m)| **m)
        .map(|(w, _)| clean(*w))
        .sum();

    weights
        .iter()
        .zip(mask)
        .map(|(w, m)| match (*m, sum > f64::EPSILON) {
            (false, _) => 0.0,
            (true, true) => clean(*w) / sum,
            (true, false) => 1.0 / active as f64,
        })
        .collect()
}

/// Compute section geometry from weights.
///
/// Returns `None` when there is nothing to proportion: fewer than two
/// sections, or at most one expanded section. Use [`fill_remaining`] for
/// that case, or [`layout`] to get either.
pub fn compute_sizes(
    container_extent: f64,
    spacing: f64,
    sections: &[SizingInput],
) -> Option<Vec<SectionGeometry>> {
    let expanded = sections.iter().filter(|s| s.expanded).count();
    if sections.len() < 2 || expanded < 2 {
        return None;
    }

    let available = available_content(container_extent, spacing, sections);
    let weights: Vec<f64> = sections.iter().map(|s| s.weight).collect();
    let mask: Vec<bool> = sections.iter().map(|s| s.expanded).collect();
    let shares = normalize(&weights, &mask);

    let content: Vec<f64> = shares.iter().map(|share| available * share).collect();
    Some(place(spacing, sections, &content))
}

/// Geometry where the single expanded section (if any) takes all
/// remaining content space.
pub fn fill_remaining(
    container_extent: f64,
    spacing: f64,
    sections: &[SizingInput],
) -> Vec<SectionGeometry> {
    let available = available_content(container_extent, spacing, sections);
    let mut remaining = available;
    let content: Vec<f64> = sections
        .iter()
        .map(|s| {
            if s.expanded {
                std::mem::take(&mut remaining)
            } else {
                0.0
            }
        })
        .collect();
    place(spacing, sections, &content)
}

/// Geometry for any configuration.
pub fn layout(container_extent: f64, spacing: f64, sections: &[SizingInput]) -> Vec<SectionGeometry> {
    compute_sizes(container_extent, spacing, sections)
        .unwrap_or_else(|| fill_remaining(container_extent, spacing, sections))
}

fn place(spacing: f64, sections: &[SizingInput], content: &[f64]) -> Vec<SectionGeometry> {
    let spacing = spacing.max(0.0);
    let mut offset = 0.0;
    sections
        .iter()
        .zip(content)
        .enumerate()
        .map(|(i, (section, content_extent))| {
            if i > 0 {
                offset += spacing;
            }
            let geometry = SectionGeometry {
                offset,
                title_extent: section.title_extent.max(0.0),
                content_extent: *content_extent,
            };
            offset += geometry.extent();
            geometry
        })
        .collect()
}

/// Snap geometry to whole cells within `[0, container_cells]`.
///
/// Boundaries are rounded rather than extents, so adjacent spans never
/// overlap and the rounded extents keep their sum.
pub fn to_cells(geometry: &[SectionGeometry], container_cells: u16) -> Vec<CellSpan> {
    let limit = f64::from(container_cells);
    let snap = |v: f64| v.round().clamp(0.0, limit) as u16;
    geometry
        .iter()
        .map(|g| {
            let start = snap(g.offset);
            let title_end = snap(g.content_offset());
            let end = snap(g.content_offset() + g.content_extent);
            CellSpan {
                offset: start,
                title_extent: title_end - start,
                content_extent: end - title_end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn expanded(weight: f64) -> SizingInput {
        SizingInput {
            title_extent: 0.0,
            expanded: true,
            weight,
        }
    }

    fn titled(title_extent: f64, expanded: bool, weight: f64) -> SizingInput {
        SizingInput {
            title_extent,
            expanded,
            weight,
        }
    }

    fn total(geometry: &[SectionGeometry], spacing: f64) -> f64 {
        let extents: f64 = geometry.iter().map(|g| g.extent()).sum();
        extents + spacing * geometry.len().saturating_sub(1) as f64
    }

    #[test]
    fn test_single_section_needs_no_redistribution() {
        for extent in [0.0, 1.0, 250.0, 10_000.0] {
            assert!(compute_sizes(extent, 4.0, &[titled(22.0, true, 1.0)]).is_none());
        }
    }

    #[test]
    fn test_one_expanded_among_many_needs_no_redistribution() {
        let sections = [
            titled(22.0, false, 0.0),
            titled(22.0, true, 1.0),
            titled(22.0, false, 0.0),
        ];
        assert!(compute_sizes(300.0, 4.0, &sections).is_none());

        let geometry = layout(300.0, 4.0, &sections);
        assert!((geometry[1].content_extent - (300.0 - 66.0 - 8.0)).abs() < EPS);
        assert_eq!(geometry[0].content_extent, 0.0);
        assert_eq!(geometry[2].content_extent, 0.0);
    }

    #[test]
    fn test_two_equal_sections_split_in_half() {
        let geometry = compute_sizes(100.0, 0.0, &[expanded(0.5), expanded(0.5)]).unwrap();
        assert!((geometry[0].content_extent - 50.0).abs() < EPS);
        assert!((geometry[1].content_extent - 50.0).abs() < EPS);
        assert!((geometry[1].offset - 50.0).abs() < EPS);
    }

    #[test]
    fn test_three_equal_sections_offsets() {
        let third = 1.0 / 3.0;
        let geometry =
            compute_sizes(90.0, 0.0, &[expanded(third), expanded(third), expanded(third)])
                .unwrap();
        assert!(geometry[0].offset.abs() < EPS);
        assert!((geometry[1].offset - 30.0).abs() < EPS);
        assert!((geometry[2].offset - 60.0).abs() < EPS);
    }

    #[test]
    fn test_conservation_with_titles_and_spacing() {
        let sections = [
            titled(22.0, true, 0.2),
            titled(22.0, false, 0.0),
            titled(22.0, true, 0.5),
            titled(22.0, true, 0.3),
        ];
        for extent in [100.0, 257.5, 1024.0] {
            let geometry = layout(extent, 4.0, &sections);
            assert!((total(&geometry, 4.0) - extent).abs() < EPS);
            assert_eq!(geometry[1].content_extent, 0.0);
            assert_eq!(geometry[1].title_extent, 22.0);
        }
    }

    #[test]
    fn test_weights_are_renormalized() {
        let drifted = compute_sizes(100.0, 0.0, &[expanded(0.3), expanded(0.3)]).unwrap();
        assert!((drifted[0].content_extent - 50.0).abs() < EPS);
        assert!((total(&drifted, 0.0) - 100.0).abs() < EPS);
    }

    #[test]
    fn test_non_positive_extent_gives_zero_content() {
        let sections = [titled(1.0, true, 0.5), titled(1.0, true, 0.5)];
        for extent in [0.0, -10.0, f64::NAN] {
            let geometry = layout(extent, 1.0, &sections);
            assert!(geometry.iter().all(|g| g.content_extent == 0.0));
        }
    }

    #[test]
    fn test_overhead_larger_than_container() {
        let sections = [titled(22.0, true, 0.5), titled(22.0, true, 0.5)];
        let geometry = layout(30.0, 4.0, &sections);
        assert!(geometry.iter().all(|g| g.content_extent == 0.0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mask = [true, false, true, true];
        let once = normalize(&[0.2, 0.7, 0.5, 0.4], &mask);
        let twice = normalize(&once, &mask);
        assert!((once.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert_eq!(once[1], 0.0);
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < EPS);
        }
    }

    #[test]
    fn test_normalize_zero_sum_shares_equally() {
        let shares = normalize(&[0.0, f64::NAN, -1.0], &[true, true, false]);
        assert_eq!(shares, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_to_cells_keeps_total() {
        let third = 1.0 / 3.0;
        let sections = [titled(1.0, true, third), titled(1.0, true, third), titled(1.0, true, third)];
        let geometry = layout(20.0, 0.0, &sections);
        let cells = to_cells(&geometry, 20);

        let sum: u16 = cells.iter().map(|c| c.title_extent + c.content_extent).sum();
        assert_eq!(sum, 20);
        assert_eq!(cells[0].offset, 0);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].offset + pair[0].title_extent + pair[0].content_extent, pair[1].offset);
        }
    }

    #[test]
    fn test_to_cells_clamps_overflow() {
        let sections = [titled(3.0, false, 0.0), titled(3.0, false, 0.0)];
        let geometry = layout(4.0, 1.0, &sections);
        let cells = to_cells(&geometry, 4);
        assert_eq!(cells[1].offset, 4);
        assert_eq!(cells[1].title_extent, 0);
    }
}
