use idier_analyze::{
    AgeConfig, FileDescriptor, ProjectAggregator, ProjectAnalysis, ProjectFolder, ProjectOrder,
};
use idier_scan::{ExclusionMatcher, TreeCollector};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: u64 = 24 * 60 * 60;

fn aggregator_at(now: SystemTime) -> ProjectAggregator {
    let config = AgeConfig::builder().reference_time(now).build().unwrap();
    ProjectAggregator::with_config(config)
}

fn file(relative: &str, now: SystemTime, days_old: u64) -> FileDescriptor {
    FileDescriptor::new(
        Path::new("/root").join(relative),
        relative,
        now - Duration::from_secs(days_old * DAY),
    )
}

fn names(projects: &[ProjectFolder]) -> Vec<&str> {
    projects.iter().map(|p| p.name.as_str()).collect()
}

fn set_age(path: &Path, days_old: u64) {
    let modified = SystemTime::now() - Duration::from_secs(days_old * DAY);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

#[test]
fn test_project_age_is_newest_file() {
    let now = SystemTime::now();
    let files = vec![
        file("proj/old.txt", now, 181),
        file("proj/src/mid.rs", now, 40),
        file("proj/new.md", now, 5),
    ];

    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/root/_Archive"), &files);

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].days_since_modified, 5);
    assert_eq!(projects[0].source_path, PathBuf::from("/root/proj"));
    assert_eq!(projects[0].archive_destination, PathBuf::from("/root/_Archive/proj"));
}

#[test]
fn test_projects_in_first_encounter_order() {
    let now = SystemTime::now();
    let files = vec![
        file("zeta/a", now, 1),
        file("alpha/a", now, 2),
        file("zeta/b", now, 3),
        file("mid/a", now, 4),
    ];

    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/archive"), &files);

    assert_eq!(names(&projects), vec!["zeta", "alpha", "mid"]);
    assert_eq!(projects[0].days_since_modified, 1);
}

#[test]
fn test_loose_files_make_no_project() {
    let now = SystemTime::now();
    let files = vec![file("readme.txt", now, 400), file("proj/a", now, 10)];

    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/archive"), &files);

    assert_eq!(names(&projects), vec!["proj"]);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_folder_is_a_project() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let now = SystemTime::now();
    let raw = OsStr::from_bytes(b"caf\xe9");
    let relative = Path::new(raw).join("f01");
    let files = vec![FileDescriptor::new(
        Path::new("/root").join(&relative),
        relative,
        now - Duration::from_secs(200 * DAY),
    )];

    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/archive"), &files);

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].days_since_modified, 200);
    assert_eq!(projects[0].source_path, Path::new("/root").join(raw));
    assert_eq!(projects[0].archive_destination, Path::new("/archive").join(raw));
}

#[test]
fn test_stale_keeps_first_encounter_order() {
    let now = SystemTime::now();
    let files = vec![
        file("middling/a", now, 200),
        file("ancient/a", now, 900),
        file("fresh/a", now, 1),
    ];
    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/archive"), &files);

    let stale = idier_analyze::select_stale(&projects, 180);

    assert_eq!(names(&stale), vec!["middling", "ancient"]);
}

#[test]
fn test_empty_listing() {
    let projects = ProjectAggregator::new().aggregate(Path::new("/root"), Path::new("/archive"), &[]);
    assert!(projects.is_empty());
}

#[test]
fn test_file_touched_now_is_age_zero() {
    let now = SystemTime::now();
    let files = vec![file("proj/a", now, 0)];

    let projects = aggregator_at(now).aggregate(Path::new("/root"), Path::new("/archive"), &files);

    assert_eq!(projects[0].days_since_modified, 0);
    assert!(!projects[0].is_stale(0));
}

#[test]
fn test_vcs_only_project_never_appears() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("only-git/.git")).unwrap();
    fs::write(root.join("only-git/.git/HEAD"), "ref").unwrap();
    fs::create_dir_all(root.join("real/.git")).unwrap();
    fs::write(root.join("real/.git/HEAD"), "ref").unwrap();
    fs::write(root.join("real/main.rs"), "").unwrap();
    set_age(&root.join("real/main.rs"), 300);

    let listing = TreeCollector::new().collect(root, &ExclusionMatcher::default()).unwrap();
    let analysis = ProjectAnalysis::from_listing(
        &ProjectAggregator::new(),
        &listing,
        &root.join("_Archive"),
        180,
    );

    assert_eq!(names(&analysis.projects), vec!["real"]);
    // The fresh .git/HEAD must not keep the project alive.
    assert_eq!(analysis.projects[0].days_since_modified, 300);
    assert!(analysis.has_stale());
}

#[test]
fn test_analysis_report() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for (name, age) in [("beta", 200), ("Alpha", 3), ("gamma", 365)] {
        fs::create_dir(root.join(name)).unwrap();
        let path = root.join(name).join("file");
        fs::write(&path, "").unwrap();
        set_age(&path, age);
    }
    fs::write(root.join("loose"), "").unwrap();

    let listing = TreeCollector::new().collect(root, &ExclusionMatcher::default()).unwrap();
    let analysis = ProjectAnalysis::from_listing(
        &ProjectAggregator::new(),
        &listing,
        &root.join("_Archive"),
        180,
    );
    let report = analysis.report(ProjectOrder::Alphabetical);

    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.project_count, 3);
    let listed: Vec<&str> = report.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(listed, vec!["Alpha", "beta", "gamma"]);
    let stale: Vec<(&str, u64)> = report.stale.iter().map(|p| (p.name.as_str(), p.age_days)).collect();
    assert_eq!(stale, vec![("gamma", 365), ("beta", 200)]);
}
