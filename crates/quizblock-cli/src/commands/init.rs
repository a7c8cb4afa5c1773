//! The `quizblock init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizblock.toml
    if std::path::Path::new("quizblock.toml").exists() {
        println!("quizblock.toml already exists, skipping.");
    } else {
        std::fs::write("quizblock.toml", SAMPLE_CONFIG)?;
        println!("Created quizblock.toml");
    }

    // Create example quiz document
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.md");
    if example_path.exists() {
        println!("quizzes/example.md already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.md");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.md or add your own quiz blocks");
    println!("  2. Run: quizblock validate --quiz quizzes/example.md");
    println!("  3. Run: quizblock run --quiz quizzes/example.md");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizblock configuration

shuffle_blank_choices = true
# seed = 42

[labels]
true_label = "True"
false_label = "False"
correct = "Correct!"
incorrect = "Incorrect. The correct answer is:"
incomplete = "Please complete your answer."
"#;

const EXAMPLE_QUIZ: &str = r#"# Example quiz

Quiz blocks live in fenced code blocks tagged `quiz`.

```quiz
-- Type mc
-- Question What is 2+2?
-- A
3
-- B
4
-- Answer B
```

```quiz
-- Type tf
-- Question Rust has a garbage collector.
-- Answer false
```

```quiz
-- Type text
-- Question Which keyword declares an immutable binding?
-- Answer let
```

```quiz
-- Type fb
-- Question [blank] + [blank] = 4
-- Answer 1, 3
```

```quiz
-- Type sort
-- Question Put the build steps in order.
-- A
Compile
-- B
Write code
-- C
Run tests
-- Answer B, A, C
```
"#;
