//! End-to-end pipeline test: raw CSV -> cleaning -> session store ->
//! filtering, aggregation, geo join and export.

use std::fs;
use std::io::Write;
use std::path::Path;

use tourviz::analysis::{aggregate, top_n, FilterSpec, Metric, Reducer};
use tourviz::config::DataPaths;
use tourviz::data::columns::{AVG_STAY, COUNTRY, REGION, TOURISTS};
use tourviz::data::{clean_datasets, store, DatasetKey, DatasetStore};
use tourviz::export;
use tourviz::geo::attach_iso3;
use tourviz::views::{economic, overview};

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    let mut file = fs::File::create(dir.join(name)).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

fn seeded_paths(tmp: &Path) -> DataPaths {
    let paths = DataPaths {
        raw_dir: tmp.join("raw"),
        cleaned_dir: tmp.join("cleaned"),
    };

    write_file(
        &paths.raw_dir,
        "frequentation_region.csv",
        "Pays,Region,Mois,Nombre de touristes,Nuitées touristiques,Durée de séjor moyenne\n\
         Allemagne,Europe,2024-01,\"1.234,5\",\"4.900,0\",\"4,2\"\n\
         Allemagne,Europe,2024-01,\"1.234,5\",\"4.900,0\",\"4,2\"\n\
         Italie,Europe,2024-01,\"500,0\",\"1.500,0\",\"3,0\"\n\
         Chine,Asie,2024-02,\"300,0\",\"1.200,0\",\"5,1\"\n\
         Andorre,Europe,2024-02,\"10,0\",\"20,0\",\"2,0\"\n",
    );
    write_file(
        &paths.raw_dir,
        "frequentation_mensuelle.csv",
        "Mois,Nombre de touristes\n2024-01,\"1.700,0\"\n2024-02,\"310,0\"\n",
    );

    paths
}

#[test]
fn raw_to_views_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = seeded_paths(tmp.path());

    // cleaning: hoteliere is absent but the others still go through
    let cleaned = clean_datasets(&paths).unwrap();
    assert_eq!(cleaned.len(), 2);

    let store = DatasetStore::load(&paths).unwrap();
    assert_eq!(
        store.keys(),
        vec![DatasetKey::Mensuelle, DatasetKey::Region]
    );
    let df = store.get(DatasetKey::Region).unwrap();

    // the duplicated Allemagne row was dropped before normalization
    assert_eq!(df.height(), 4);
    assert!(df.column(AVG_STAY).is_ok());

    // overview KPIs over normalized values
    let kpis = overview::kpis(df).unwrap();
    assert_eq!(kpis.total_tourists, 1234.5 + 500.0 + 300.0 + 10.0);
    assert_eq!(kpis.countries, 4);

    // filtered aggregation: Europe only, January only
    let spec = FilterSpec {
        region: Some("Europe".to_string()),
        months: Some(("2024-01".to_string(), "2024-01".to_string())),
        ..Default::default()
    };
    let filtered = spec.apply(df).unwrap();
    let agg = aggregate(
        &filtered,
        &[REGION],
        &[Metric::new(TOURISTS, Reducer::Sum)],
    )
    .unwrap();
    assert_eq!(agg.height(), 1);

    // geo join on a country aggregate drops Andorre and reports it
    let by_country = aggregate(df, &[COUNTRY], &[Metric::new(TOURISTS, Reducer::Sum)]).unwrap();
    let join = attach_iso3(&by_country, COUNTRY).unwrap();
    assert_eq!(join.dropped, 1);
    assert_eq!(join.df.height(), 3);

    // top-1 country by volume
    let top = top_n(&by_country, TOURISTS, 1, false).unwrap();
    assert_eq!(top.height(), 1);

    // intensity never divides by zero on an empty subset
    let empty_kpis = economic::kpis(df, &FilterSpec::region("Antarctique")).unwrap();
    assert_eq!(empty_kpis.intensity, 0.0);

    // download path: normalized decimal points in the exported bytes
    let bytes = export::to_csv_bytes(&join.df).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("ISO3"));
    assert!(text.contains("1234.5"));
}

#[test]
fn process_wide_store_loads_once() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = seeded_paths(tmp.path());
    clean_datasets(&paths).unwrap();

    let first = store::init(&paths).unwrap();
    let second = store::init(&paths).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(store::get().is_some());
}
