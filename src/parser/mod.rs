pub mod anchors;
pub mod extract;
pub mod tree;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::GlobalCatalogs;
use crate::dataset::RawDataset;
use crate::error::{ExtractError, Result};
use crate::geo::GeoIndex;
use crate::record::{InstitutionRecord, OutputDocument, RankingMap};
use anchors::Page;
use tree::RawSchool;

const CHUNK_SIZE: usize = 256;

/// 0-based input position and institution count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolPosition {
    pub index: usize,
    pub total: usize,
}

/// The richer export carries a search index and gets geo, majors and catalogs.
#[derive(Clone, Copy)]
pub enum Variant<'g> {
    Full { geo: &'g GeoIndex<'g> },
    Reduced,
}

/// One institution → its record plus the catalog entries it contributed.
pub fn process_school(
    school: &RawSchool,
    position: SchoolPosition,
    variant: Variant<'_>,
) -> Result<(InstitutionRecord, GlobalCatalogs)> {
    debug!(index = position.index, name = %school.entity_data.name, "parsing school");

    let mut rec = InstitutionRecord::new(&school.entity_data.name, &school.entity_data.url);
    let mut catalogs = GlobalCatalogs::default();
    if let Variant::Full { .. } = variant {
        rec.major_rankings = Some(RankingMap::new());
    }

    let pages = [
        (Page::Main, &school.blocks),
        (Page::Rankings, &school.rankings.blocks),
        (Page::Admissions, &school.admissions.blocks),
        (Page::Academics, &school.academics.blocks),
    ];
    for (page, blocks) in pages {
        for block in blocks {
            extract::apply_block(page, block, &mut rec, &mut catalogs)?;
        }
        if page == Page::Rankings {
            extract::rankings::insert_overall(&mut rec, position);
        }
    }

    if let Variant::Full { geo } = variant {
        let centroid = geo.resolve(&rec.slug)?;
        rec.latitude = Some(centroid.lat);
        rec.longitude = Some(centroid.lon);
    }

    Ok((rec, catalogs))
}

/// Normalize every institution. Extraction runs in parallel per chunk; records
/// and catalog entries are folded in input order so the result matches a
/// sequential pass. The first failing institution (by input order) aborts the run.
pub fn parse_dataset(dataset: &RawDataset, on_progress: impl Fn(usize)) -> Result<OutputDocument> {
    let total = dataset.schools.len();
    let geo = dataset.pages.as_deref().map(GeoIndex::build);
    let variant = match &geo {
        Some(geo) => {
            info!(entities = geo.len(), "built search index");
            Variant::Full { geo }
        }
        None => {
            info!("no search index in input, emitting reduced records");
            Variant::Reduced
        }
    };

    let mut catalogs = GlobalCatalogs::seeded(total as u64);
    let mut records = Vec::with_capacity(total);

    for (chunk_no, chunk) in dataset.schools.chunks(CHUNK_SIZE).enumerate() {
        let base = chunk_no * CHUNK_SIZE;
        let results: Vec<Result<_>> = chunk
            .par_iter()
            .enumerate()
            .map(|(offset, school)| {
                let position = SchoolPosition {
                    index: base + offset,
                    total,
                };
                process_school(school, position, variant).map_err(|e| ExtractError::InSchool {
                    index: position.index,
                    name: school.entity_data.name.clone(),
                    source: Box::new(e),
                })
            })
            .collect();

        for result in results {
            let (rec, delta) = result?;
            records.push(rec);
            catalogs.merge(delta);
        }
        on_progress(chunk.len());
    }

    info!(
        schools = records.len(),
        rankings = catalogs.rankings.len(),
        major_rankings = catalogs.major_rankings.len(),
        majors = catalogs.majors.len(),
        "parsed all schools"
    );

    Ok(match variant {
        Variant::Full { .. } => OutputDocument::Full {
            majors: catalogs.sorted_majors(),
            schools: records,
            rankings: catalogs.rankings,
            major_rankings: catalogs.major_rankings,
        },
        Variant::Reduced => OutputDocument::Reduced(records),
    })
}
