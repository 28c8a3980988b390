use oriento::error::CatalogueError;
use oriento::explore::formations::{load_snapshot_path, merge_stats};
use oriento::explore::{FormationCatalogue, FormationImporter, SectorFilter};
use std::fs;

const CARTOGRAPHY: &str = "\
Code interne Parcoursup de la formation;Nom long de la formation;Nom court de la formation;Informations complémentaires;Domaine;Nom de l'établissement;Types de formation;Lien vers la fiche formation;Lien vers les données statistiques pour l'année antérieure;Site internet de l'établissement;Localisation
6217;BUT - Informatique;BUT Info;Parcours déploiement d'applications;Informatique et Numérique, Sciences;IUT de Lannion;BUT;https://dossier.parcoursup.fr/6217;https://dossier.parcoursup.fr/stats/6217;https://iut-lannion.fr;Lannion
;Licence - Psychologie;;;Santé et Esthétique;Université Rennes 2;Licence;;;;Rennes

6301;;BTS SIO;;;Lycée Chaptal;BTS;;;;Quimper
";

#[test]
fn imports_cartography_export_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("cartographie_formations_parcoursup.csv");
    fs::write(&csv_path, CARTOGRAPHY).expect("csv written");

    let catalogue = FormationImporter::from_path(&csv_path).expect("import succeeds");
    assert_eq!(catalogue.len(), 3);

    let but = catalogue.find("6217").expect("BUT imported");
    assert_eq!(but.title, "BUT - Informatique");
    assert_eq!(but.sector(), "Informatique et Numérique");
    assert_eq!(but.kind, "BUT");
    assert_eq!(but.links.site, "https://iut-lannion.fr");
    assert_eq!(but.location, "Lannion");

    // blank lines are skipped, so the licence is row 1
    let licence = catalogue.find("1").expect("licence keyed by row index");
    assert_eq!(licence.etablissement, "Université Rennes 2");

    let bts = catalogue.find("6301").expect("BTS imported");
    assert_eq!(bts.title, "BTS SIO");
    assert_eq!(bts.sector(), "Autre");

    let json_path = dir.path().join("formations.json");
    catalogue.save_json(&json_path).expect("json saved");
    let reloaded = FormationCatalogue::from_path(&json_path).expect("json reloads");
    assert_eq!(reloaded.all(), catalogue.all());
    assert_eq!(
        reloaded
            .search("lycée", &SectorFilter::All)
            .iter()
            .map(|formation| formation.id.as_str())
            .collect::<Vec<_>>(),
        vec!["6301"]
    );
}

#[test]
fn merges_statistics_snapshot_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalogue = FormationImporter::from_reader(CARTOGRAPHY.as_bytes()).expect("import");

    let stats_path = dir.path().join("parcoursup_stats_snapshot.json");
    fs::write(
        &stats_path,
        r#"[
            {"recordid": "a", "fields": {"cod_aff_form": "6301", "capa_fin": 24}},
            {"recordid": "b", "fields": {"cod_aff_form": 9999, "capa_fin": 10}}
        ]"#,
    )
    .expect("snapshot written");

    let records = load_snapshot_path(&stats_path).expect("snapshot loads");
    let (merged, summary) = merge_stats(catalogue, &records);

    assert_eq!(summary.catalogue, 3);
    assert_eq!(summary.stats, 2);
    assert_eq!(summary.unique, 1);
    let bts = merged.find("6301").expect("BTS kept");
    let stats = bts.stats.as_ref().expect("stats attached");
    assert_eq!(stats["capa_fin"], 24);
}

#[test]
fn missing_files_are_reported_with_their_path() {
    let dir = tempfile::tempdir().expect("temp dir");

    let missing = dir.path().join("absent.csv");
    let error = FormationImporter::from_path(&missing).expect_err("csv is missing");
    assert!(matches!(&error, CatalogueError::Read { path, .. } if path == &missing));
    assert!(error.to_string().contains(&missing.display().to_string()));

    let missing = dir.path().join("absent.json");
    let error = load_snapshot_path(&missing).expect_err("snapshot is missing");
    assert!(matches!(&error, CatalogueError::Read { path, .. } if path == &missing));

    let error = FormationCatalogue::from_path(&missing).expect_err("catalogue is missing");
    assert!(error.to_string().contains("absent.json"));
}
