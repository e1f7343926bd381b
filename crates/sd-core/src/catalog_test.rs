use super::*;
use std::fs;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").unwrap();
}

#[test]
fn test_parse_leading_digits() {
    assert_eq!(parse_change_number("001_init.sql").unwrap(), Some(1));
    assert_eq!(parse_change_number("42.php").unwrap(), Some(42));
}

#[test]
fn test_parse_first_digit_run_anywhere() {
    assert_eq!(parse_change_number("patch-12-then-7.sql").unwrap(), Some(12));
    assert_eq!(parse_change_number("v2_users.sql").unwrap(), Some(2));
}

#[test]
fn test_parse_no_digits() {
    assert_eq!(parse_change_number("readme.txt").unwrap(), None);
    assert_eq!(parse_change_number("").unwrap(), None);
}

#[test]
fn test_parse_ignores_non_ascii_digits() {
    // Arabic-Indic digits are not a change number
    assert_eq!(parse_change_number("\u{0661}\u{0662}_x.sql").unwrap(), None);
}

#[test]
fn test_parse_overflow_is_error() {
    let err = parse_change_number("99999999999999999999_huge.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidChangeNumber { .. }));
}

#[test]
fn test_list_changes_skips_files_without_digits() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "readme.txt");
    touch(temp.path(), "003_patch.sql");

    let catalog = list_changes(temp.path()).unwrap();
    assert_eq!(catalog.change_numbers(), vec![3]);
    assert_eq!(catalog.get(3).unwrap().file_name, "003_patch.sql");
}

#[test]
fn test_list_changes_sorted_ascending() {
    let temp = TempDir::new().unwrap();
    for name in ["010_c.sql", "002_b.sql", "1_a.sql", "005_idx.sql"] {
        touch(temp.path(), name);
    }

    let catalog = list_changes(temp.path()).unwrap();
    assert_eq!(catalog.change_numbers(), vec![1, 2, 5, 10]);
}

#[test]
fn test_list_changes_paths_are_absolute() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001_init.sql");

    let catalog = list_changes(temp.path()).unwrap();
    let change = catalog.get(1).unwrap();
    assert!(change.path.is_absolute());
    assert!(change.path.ends_with("001_init.sql"));
    assert!(change.path.exists());
}

#[test]
fn test_list_changes_ignores_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("002_archive")).unwrap();
    touch(temp.path(), "001_init.sql");

    let catalog = list_changes(temp.path()).unwrap();
    assert_eq!(catalog.change_numbers(), vec![1]);
}

#[test]
fn test_list_changes_missing_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let err = list_changes(&missing).unwrap_err();
    assert!(matches!(err, CoreError::DirectoryNotFound { .. }));
}

#[test]
fn test_list_changes_path_is_a_file() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001_init.sql");

    let err = list_changes(&temp.path().join("001_init.sql")).unwrap_err();
    assert!(matches!(err, CoreError::DirectoryNotFound { .. }));
}

#[test]
fn test_list_changes_duplicate_numbers_conflict() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001_init.sql");
    touch(temp.path(), "1_init_again.sql");

    let err = list_changes(temp.path()).unwrap_err();
    match err {
        CoreError::DuplicateChangeNumber {
            change_number,
            first,
            second,
        } => {
            assert_eq!(change_number, 1);
            let mut names = vec![first, second];
            names.sort();
            assert_eq!(names, vec!["001_init.sql", "1_init_again.sql"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_from_files_keeps_listing_order_in_conflict() {
    let dir = Path::new("/scripts");
    let files = vec![
        ChangeFile::new(4, "004_b.sql", dir),
        ChangeFile::new(4, "4_a.sql", dir),
    ];

    let err = ChangeCatalog::from_files(files).unwrap_err();
    match err {
        CoreError::DuplicateChangeNumber { first, second, .. } => {
            assert_eq!(first, "004_b.sql");
            assert_eq!(second, "4_a.sql");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_directory_gives_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let catalog = list_changes(temp.path()).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}
