use fieldset_engine::{CollectorConfig, EngineError, ProgramForm, RecordErrorMode};
use fieldset_harness::{FormBuilder, MemorySink, MemorySinkError, init_test_logging};

fn filled_form() -> FormBuilder {
    let mut form = FormBuilder::new("exercise");
    form.top_level("name", "Strength A")
        .top_level("description", "Heavy lower body");
    let squat = form.add_fieldset();
    let bench = form.add_fieldset();
    form.set(squat, "name", "Squat")
        .set(squat, "sets", "5")
        .set(squat, "reps", "5")
        .set(squat, "weight", "140");
    form.set(bench, "name", "Bench").set(bench, "reps", "8");
    form
}

#[test]
fn submit_hands_program_to_sink() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let form = ProgramForm::new(CollectorConfig::default())?;
    let mut sink = MemorySink::new();

    let id = form.submit(&filled_form().build(), &mut sink)?;

    assert_eq!(sink.len(), 1);
    let program = sink.load(id)?.ok_or("program not saved")?;
    assert_eq!(program.id, id);
    assert_eq!(program.name, "Strength A");
    assert_eq!(program.description.as_deref(), Some("Heavy lower body"));
    assert_eq!(program.exercises.len(), 2);
    assert_eq!(program.exercises[0].weight, Some(140.0));
    assert_eq!(program.exercises[1].reps, Some(8));
    Ok(())
}

#[test]
fn rejected_submission_never_reaches_sink() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut builder = filled_form();
    let extra = builder.add_fieldset();
    builder.set(extra, "name", "Row").set(extra, "sets", "three");

    let form = ProgramForm::new(CollectorConfig::default())?;
    let mut sink = MemorySink::new();
    let err = form.submit(&builder.build(), &mut sink).unwrap_err();

    match err {
        EngineError::Rejected { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].group_index(), Some(extra));
            assert_eq!(errors[0].field_key(), Some("sets"));
        }
        other => panic!("expected rejection, got {other}"),
    }
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn drop_record_mode_saves_the_rest() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = filled_form();
    let extra = builder.add_fieldset();
    builder.set(extra, "name", "Row").set(extra, "sets", "three");

    let config = CollectorConfig::from_toml_str(r#"on_error = "drop_record""#)?;
    assert_eq!(config.on_error, RecordErrorMode::DropRecord);
    let form = ProgramForm::new(config)?;
    let mut sink = MemorySink::new();
    let id = form.submit(&builder.build(), &mut sink)?;

    let program = sink.load(id)?.ok_or("program not saved")?;
    let names: Vec<_> = program.exercises.iter().filter_map(|e| e.name.as_deref()).collect();
    assert_eq!(names, ["Squat", "Bench"]);
    Ok(())
}

#[test]
fn sink_failure_is_surfaced() -> Result<(), Box<dyn std::error::Error>> {
    let form = ProgramForm::new(CollectorConfig::default())?;
    let mut sink = MemorySink::new();
    sink.fail_next();

    let err = form.submit(&filled_form().build(), &mut sink).unwrap_err();
    match err {
        EngineError::Sink(source) => assert!(matches!(
            source.downcast_ref::<MemorySinkError>(),
            Some(MemorySinkError::Simulated)
        )),
        other => panic!("expected sink error, got {other}"),
    }
    assert!(sink.is_empty());

    // The failure is one-shot.
    form.submit(&filled_form().build(), &mut sink)?;
    assert_eq!(sink.len(), 1);
    Ok(())
}

#[test]
fn each_submission_gets_its_own_program() -> Result<(), Box<dyn std::error::Error>> {
    let form = ProgramForm::new(CollectorConfig::default())?;
    let mut sink = MemorySink::new();
    let a = form.submit(&filled_form().build(), &mut sink)?;
    let b = form.submit(&filled_form().build(), &mut sink)?;
    assert_ne!(a, b);
    let ids: Vec<_> = sink.ids().collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a) && ids.contains(&b));

    let first = sink.load(a)?.ok_or("missing")?;
    let second = sink.load(b)?.ok_or("missing")?;
    assert_eq!(first.exercises, second.exercises);
    Ok(())
}

#[test]
fn missing_program_name() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = FormBuilder::new("exercise");
    let i = builder.add_fieldset();
    builder.set(i, "name", "Squat");
    let form = ProgramForm::new(CollectorConfig::default())?;
    let mut sink = MemorySink::new();
    let err = form.submit(&builder.build(), &mut sink).unwrap_err();
    assert!(matches!(err, EngineError::MissingField(ref f) if f == "name"));
    Ok(())
}
