    use super::*;

    fn layout() -> (tempfile::TempDir, Registry) {
        let tmp = tempfile::tempdir().expect("create tempdir");
        fs::create_dir_all(tmp.path().join(REPOSITORIES_DIR)).expect("create repositories");
        fs::create_dir_all(tmp.path().join(IMAGES_DIR)).expect("create images");
        let registry = Registry::open(tmp.path()).expect("open registry");
        (tmp, registry)
    }

    #[test]
    fn open_rejects_missing_root() {
        let tmp = tempfile::tempdir().expect("create tempdir");
        let err = Registry::open(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{}", err);
    }

    #[test]
    fn open_rejects_root_that_is_a_file() {
        let tmp = tempfile::tempdir().expect("create tempdir");
        let file = tmp.path().join("registry");
        fs::write(&file, b"").expect("write file");
        let err = Registry::open(&file).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{}", err);
    }

    #[test]
    fn open_requires_both_subtrees() {
        let tmp = tempfile::tempdir().expect("create tempdir");
        fs::create_dir_all(tmp.path().join(REPOSITORIES_DIR)).expect("create repositories");
        fs::write(tmp.path().join(IMAGES_DIR), b"not a dir").expect("write images file");
        match Registry::open(tmp.path()).unwrap_err() {
            Error::Layout { path } => assert_eq!(path, tmp.path().join(IMAGES_DIR)),
            other => panic!("expected layout error, got {}", other),
        }
    }

    #[test]
    fn repositories_skip_plain_files_at_both_levels() {
        let (tmp, registry) = layout();
        let repos = tmp.path().join(REPOSITORIES_DIR);
        fs::create_dir_all(repos.join("library/ubuntu")).expect("create repo");
        fs::create_dir_all(repos.join("acme/app")).expect("create repo");
        fs::write(repos.join("README"), b"x").expect("write stray file");
        fs::write(repos.join("library/stray"), b"x").expect("write stray file");

        let names: Vec<String> = registry
            .repositories()
            .expect("list repositories")
            .iter()
            .map(|r| r.full_name())
            .collect();
        assert_eq!(names, vec!["acme/app", "library/ubuntu"]);
    }

    #[test]
    fn tags_match_prefix_and_ignore_directories() {
        let (tmp, registry) = layout();
        let repo_path = tmp.path().join(REPOSITORIES_DIR).join("library/ubuntu");
        fs::create_dir_all(repo_path.join("tag_dir")).expect("create tag-like dir");
        fs::write(repo_path.join("tag_latest"), b"abc\n").expect("write tag");
        fs::write(repo_path.join("tag_1.0"), b"def").expect("write tag");
        fs::write(repo_path.join(INDEX_FILE), b"[]").expect("write index");
        fs::write(repo_path.join("mytag_x"), b"ghi").expect("write non-tag");

        let repo = registry.repositories().expect("list repositories").remove(0);
        let tags = registry.tags(&repo).expect("list tags");
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["tag_1.0", "tag_latest"]);

        let target = registry.read_tag_target(&tags[1]).expect("read tag");
        assert_eq!(target, Some(ImageId::from("abc")));
    }

    #[test]
    fn tag_pointing_outside_images_is_ignored() {
        let (tmp, registry) = layout();
        let repo_path = tmp.path().join(REPOSITORIES_DIR).join("library/ubuntu");
        fs::create_dir_all(&repo_path).expect("create repo");
        fs::write(repo_path.join("tag_evil"), b"../repositories\n").expect("write tag");

        let repo = registry.repositories().expect("list repositories").remove(0);
        let tags = registry.tags(&repo).expect("list tags");
        assert_eq!(registry.read_tag_target(&tags[0]).expect("read tag"), None);
    }

    #[test]
    fn tag_with_binary_content_is_ignored() {
        let (tmp, registry) = layout();
        let repo_path = tmp.path().join(REPOSITORIES_DIR).join("library/ubuntu");
        fs::create_dir_all(&repo_path).expect("create repo");
        fs::write(repo_path.join("tag_garbled"), [0xff, 0xfe, 0x00, 0x61]).expect("write tag");

        let repo = registry.repositories().expect("list repositories").remove(0);
        let tags = registry.tags(&repo).expect("list tags");
        assert_eq!(registry.read_tag_target(&tags[0]).expect("read tag"), None);
    }

    #[test]
    fn image_ids_list_directories_only() {
        let (tmp, registry) = layout();
        let images = tmp.path().join(IMAGES_DIR);
        fs::create_dir_all(images.join("bbb")).expect("create image");
        fs::create_dir_all(images.join("aaa")).expect("create image");
        fs::write(images.join("ccc"), b"").expect("write stray file");

        let ids = registry.image_ids().expect("list images");
        assert_eq!(ids, vec![ImageId::from("aaa"), ImageId::from("bbb")]);
    }

    #[test]
    fn ancestry_missing_is_none_and_malformed_is_parse_error() {
        let (tmp, registry) = layout();
        let images = tmp.path().join(IMAGES_DIR);
        fs::create_dir_all(images.join("aaa")).expect("create image");
        fs::create_dir_all(images.join("bbb")).expect("create image");
        fs::write(images.join("bbb").join(ANCESTRY_FILE), b"[\"bbb\",").expect("write ancestry");

        assert_eq!(registry.read_ancestry(&ImageId::from("aaa")).expect("read"), None);
        let err = registry.read_ancestry(&ImageId::from("bbb")).unwrap_err();
        assert!(err.is_parse(), "{}", err);
    }

    #[test]
    fn checksum_marker_is_optional() {
        let (tmp, registry) = layout();
        let images = tmp.path().join(IMAGES_DIR);
        fs::create_dir_all(images.join("aaa")).expect("create image");
        fs::create_dir_all(images.join("bbb")).expect("create image");
        fs::write(images.join("bbb").join(CHECKSUM_FILE), b"sha256:x").expect("write marker");

        assert!(registry.checksum_modified(&ImageId::from("aaa")).expect("stat").is_none());
        assert!(registry.checksum_modified(&ImageId::from("bbb")).expect("stat").is_some());
    }

    #[test]
    fn remove_image_is_idempotent() {
        let (tmp, registry) = layout();
        let image = tmp.path().join(IMAGES_DIR).join("aaa");
        fs::create_dir_all(image.join("nested")).expect("create image");
        fs::write(image.join("nested/layer"), b"data").expect("write layer");

        let id = ImageId::from("aaa");
        registry.remove_image(&id).expect("first removal");
        assert!(!image.exists());
        registry.remove_image(&id).expect("second removal");
    }

    #[test]
    fn write_index_replaces_file_in_place() {
        let (tmp, registry) = layout();
        let repo_path = tmp.path().join(REPOSITORIES_DIR).join("library/ubuntu");
        fs::create_dir_all(&repo_path).expect("create repo");
        fs::write(repo_path.join(INDEX_FILE), br#"[{"id":"a","checksum":"x"},{"id":"b"}]"#)
            .expect("write index");

        let repo = registry.repositories().expect("list repositories").remove(0);
        let mut entries = registry.read_index(&repo).expect("read").expect("index present");
        entries.pop();
        registry.write_index(&repo, &entries).expect("write index");

        let raw = fs::read_to_string(repo_path.join(INDEX_FILE)).expect("read back");
        assert_eq!(raw, r#"[{"id":"a","checksum":"x"}]"#);
        let leftovers: Vec<_> = fs::read_dir(&repo_path)
            .expect("read repo")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn write_index_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (tmp, registry) = layout();
        let repo_path = tmp.path().join(REPOSITORIES_DIR).join("library/ubuntu");
        fs::create_dir_all(&repo_path).expect("create repo");
        let index = repo_path.join(INDEX_FILE);
        fs::write(&index, br#"[{"id":"a"},{"id":"b"}]"#).expect("write index");
        fs::set_permissions(&index, fs::Permissions::from_mode(0o600)).expect("chmod index");

        let repo = registry.repositories().expect("list repositories").remove(0);
        registry
            .write_index(&repo, &[serde_json::json!({"id": "a"})])
            .expect("write index");

        let mode = fs::metadata(&index).expect("stat index").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn failed_replace_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().expect("create tempdir");
        let target = tmp.path().join(INDEX_FILE);
        fs::create_dir_all(target.join("occupied")).expect("create blocking dir");

        let err = write_atomic(&target, b"[]").unwrap_err();
        assert!(matches!(err, Error::Io { action: "replace", .. }), "{}", err);
        let names: Vec<String> = fs::read_dir(tmp.path())
            .expect("read dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![INDEX_FILE.to_string()]);
    }
