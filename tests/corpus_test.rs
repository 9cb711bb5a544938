//! Integration tests over real PDF files generated with lopdf.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use sectionrank::parser::PdfLayoutSource;
use sectionrank::pipeline::collect_pdf_paths;
use sectionrank::{
    analyze_corpus, analyze_file, outline_file, AnalyzeOptions, Error, HeadingLevel,
    LayoutSource, PersonaConfig, SectionRank, SectionType,
};

/// One shown string: text, font size, baseline.
type Text<'a> = (&'a str, i64, i64);

/// Build a PDF with one Helvetica text line per entry.
fn build_pdf(pages: &[&[Text]]) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|texts| {
            texts
                .iter()
                .flat_map(|(text, size, y)| {
                    vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), (*size).into()]),
                        Operation::new("Td", vec![72.into(), (*y).into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ]
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    build_pdf_from_operations(pages)
}

/// Build a PDF whose pages draw with the given operations and Helvetica as `F1`.
fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn kinematics_pdf() -> Vec<u8> {
    build_pdf(&[
        &[
            ("Kinematics", 20, 760),
            ("Example 2. Solve the problem for the final velocity.", 11, 720),
        ],
        &[
            ("Motion graphs", 16, 760),
            ("Use the formula v - u/t 4 to find a/b.", 11, 720),
        ],
        &[],
    ])
}

fn optics_pdf() -> Vec<u8> {
    build_pdf(&[&[
        ("Optics", 20, 760),
        ("Thin lenses", 16, 740),
        ("Derive the lens equation 1/f 1/u 1/v", 11, 720),
    ]])
}

fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn config() -> PersonaConfig {
    PersonaConfig::new("Physics student", "Revise for the exam")
}

#[test]
fn test_pdf_layout_source_reads_spans() {
    let source = PdfLayoutSource::from_bytes(&kinematics_pdf()).unwrap();
    assert_eq!(source.page_count(), 3);

    let first = source.page(1).unwrap();
    let lines: Vec<String> = first.lines().map(|l| l.text()).collect();
    assert_eq!(
        lines,
        vec![
            "Kinematics".to_string(),
            "Example 2. Solve the problem for the final velocity.".to_string()
        ]
    );

    let sizes: Vec<f32> = first.spans().map(|s| s.size).collect();
    assert_eq!(sizes, vec![20.0, 11.0]);

    assert!(source.page(3).unwrap().is_empty());
    assert!(matches!(source.page(4), Err(Error::PageOutOfRange(4, 3))));
}

/// One heading drawn with two `Tj` operators that split a word.
fn split_heading_pdf() -> Vec<u8> {
    build_pdf_from_operations(vec![vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new("Tj", vec![Object::string_literal("Exam")]),
        Operation::new("Tj", vec![Object::string_literal("ple 3: solve for the velocity")]),
        Operation::new("ET", vec![]),
    ]])
}

#[test]
fn test_split_text_operators_form_one_line() {
    let source = PdfLayoutSource::from_bytes(&split_heading_pdf()).unwrap();
    let page = source.page(1).unwrap();

    let lines: Vec<String> = page.lines().map(|l| l.text()).collect();
    assert_eq!(lines, vec!["Example 3: solve for the velocity".to_string()]);
    assert_eq!(page.spans().count(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "split.pdf", &split_heading_pdf());

    let analysis = analyze_file(&path).unwrap();
    assert_eq!(analysis.candidates.len(), 1);
    assert_eq!(
        analysis.candidates[0].section_title,
        "Example 3: solve for the velocity"
    );
    assert_eq!(analysis.candidates[0].section_type, SectionType::Example);

    let outline: Vec<(HeadingLevel, &str, u32)> = analysis
        .outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();
    assert_eq!(
        outline,
        vec![(HeadingLevel::H1, "Example 3: solve for the velocity", 1)]
    );
}

#[test]
fn test_analyze_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kinematics.pdf", &kinematics_pdf());

    let analysis = analyze_file(&path).unwrap();
    assert_eq!(analysis.name, "kinematics.pdf");
    assert_eq!(analysis.candidates.len(), 2);

    let example = &analysis.candidates[0];
    assert_eq!(example.page_number, 1);
    assert_eq!(example.topic, "Kinematics");
    assert_eq!(example.section_type, SectionType::Example);
    assert_eq!(analysis.summaries[0].refined_text, "Example 2.");

    let formula = &analysis.candidates[1];
    assert_eq!(formula.page_number, 2);
    assert_eq!(formula.topic, "Motion graphs");
    assert_eq!(formula.section_type, SectionType::Formula);
    assert_eq!(formula.weighted_score, 8);
}

#[test]
fn test_outline_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kinematics.pdf", &kinematics_pdf());

    let outline = outline_file(&path).unwrap();
    let entries: Vec<(HeadingLevel, &str, u32)> = outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();

    assert_eq!(entries[0], (HeadingLevel::H1, "Kinematics", 1));
    assert!(entries.contains(&(HeadingLevel::H2, "Motion graphs", 2)));
    assert_eq!(
        entries.last(),
        Some(&(HeadingLevel::None, "No heading", 3))
    );
}

#[test]
fn test_collect_pdf_paths_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.pdf", b"");
    write(dir.path(), "a.pdf", b"");
    write(dir.path(), "notes.txt", b"");
    write(dir.path(), "UPPER.PDF", b"");
    std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

    let names: Vec<String> = collect_pdf_paths(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);
}

#[test]
fn test_corpus_ranks_across_documents() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "optics.pdf", &optics_pdf());
    write(dir.path(), "kinematics.pdf", &kinematics_pdf());

    let report = analyze_corpus(dir.path(), &config(), &AnalyzeOptions::default()).unwrap();

    assert_eq!(
        report.metadata.input_documents,
        vec!["kinematics.pdf", "optics.pdf"]
    );
    assert_eq!(report.metadata.persona, "Physics student");

    let ranked: Vec<(&str, u32, usize)> = report
        .extracted_sections
        .iter()
        .map(|s| (s.document.as_str(), s.page_number, s.importance_rank))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("optics.pdf", 1, 1),
            ("kinematics.pdf", 2, 2),
            ("kinematics.pdf", 1, 3),
        ]
    );
    assert_eq!(report.subsection_analysis.len(), 3);
    assert_eq!(report.document_outlines.len(), 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..6 {
        let data = if i % 2 == 0 { kinematics_pdf() } else { optics_pdf() };
        write(dir.path(), &format!("doc{}.pdf", i), &data);
    }

    let parallel = analyze_corpus(dir.path(), &config(), &AnalyzeOptions::new()).unwrap();
    let sequential =
        analyze_corpus(dir.path(), &config(), &AnalyzeOptions::new().sequential()).unwrap();

    assert_eq!(parallel.metadata.input_documents, sequential.metadata.input_documents);
    assert_eq!(parallel.extracted_sections, sequential.extracted_sections);
    assert_eq!(parallel.subsection_analysis, sequential.subsection_analysis);
    assert_eq!(parallel.document_outlines, sequential.document_outlines);
}

#[test]
fn test_lenient_skips_broken_documents() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.pdf", b"this is not a pdf");
    write(dir.path(), "kinematics.pdf", &kinematics_pdf());

    let report = SectionRank::new()
        .lenient()
        .run(dir.path(), &config())
        .unwrap()
        .report;

    assert_eq!(report.metadata.input_documents, vec!["kinematics.pdf"]);
    assert!(report
        .extracted_sections
        .iter()
        .all(|s| s.document == "kinematics.pdf"));
    assert!(!report.document_outlines.contains_key("broken.pdf"));
}

#[test]
fn test_strict_aborts_on_broken_document() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.pdf", b"this is not a pdf");
    write(dir.path(), "kinematics.pdf", &kinematics_pdf());

    let result = SectionRank::new().strict().run(dir.path(), &config());
    match result {
        Err(Error::Document { name, source }) => {
            assert_eq!(name, "broken.pdf");
            assert!(matches!(*source, Error::UnknownFormat));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("strict run should fail"),
    }
}

#[test]
fn test_report_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "optics.pdf", &optics_pdf());
    let output = dir.path().join("output").join("challenge1b_output.json");

    SectionRank::new()
        .sequential()
        .run(dir.path(), &config())
        .unwrap()
        .write(&output, sectionrank::JsonFormat::Pretty)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["extracted_sections"][0]["type"], "derivation");
    assert_eq!(value["extracted_sections"][0]["topic"], "Thin lenses");
    assert_eq!(value["document_outlines"]["optics.pdf"][0]["level"], "H1");
}
