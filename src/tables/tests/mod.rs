//! Shared fixtures for table loading tests

use crate::config::TablePaths;
use crate::constants::files;
use std::fs;
use std::path::Path;
use tempfile::TempDir;


pub const LONGITUDES_CSV: &str = "\
NORAD,Longitude
25544,100.0
28884,10.3
40000,-75.2
99999,45.0
";

pub const CATALOG_CSV: &str = "\
NORAD,SATNAME,COUNTRY,LAUNCH
25544,SAT-A,US,1998-11-20
28884,SAT-B,FR ,2005-10-13
40000,SAT-C,ATLANTIS,2014-05-01
";

pub const NETWORKS_CSV: &str = "\
Network Name,ITU Administration,Longitude,Planned or Non-Planned,Brought-into-Use Date,Early-Stage Filing Date
X,USA,100.4,Non-Planned,2015-03-01,2012-06-11
EUTELSAT-A, F ,10.0,Non-Planned,1980-04-01,1975-01-01
OLD-PLAN,USA,-75.0,Planned,,
";

pub const SUSPENSIONS_CSV: &str = "\
ADM,Satellite&nbsp;Name,Type,Date of suspension,Date of resumption of operation
USA,Z,T,01.01.2020,
F,EUTELSAT-A,P,01.01.2020,31.12.2024
";

pub const ADMINISTRATIONS_CSV: &str = "\
SpaceTrack Abbreviation,Code1,Code2,Code3
US,USA,,
FR,F,,
ITSO,USA,F,G
";

/// Write the five sample tables into `dir`
pub fn write_sample_tables(dir: &Path) -> std::io::Result<()> {
    fs::write(dir.join(files::LONGITUDES), LONGITUDES_CSV)?;
    fs::write(dir.join(files::CATALOG), CATALOG_CSV)?;
    fs::write(dir.join(files::NETWORKS), NETWORKS_CSV)?;
    fs::write(dir.join(files::SUSPENSIONS), SUSPENSIONS_CSV)?;
    fs::write(dir.join(files::ADMINISTRATIONS), ADMINISTRATIONS_CSV)?;
    Ok(())
}

/// Temp directory holding the sample tables, with paths pointing at it
pub fn sample_tables() -> (TempDir, TablePaths) {
    let temp_dir = TempDir::new().unwrap();
    write_sample_tables(temp_dir.path()).unwrap();
    let paths = TablePaths::in_dir(temp_dir.path().to_path_buf());
    (temp_dir, paths)
}
