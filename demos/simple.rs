use trussview::{process_lines, Scene, SceneConfig, TrussModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A small roof truss, written the way an input file would be
    let lines = [
        "title 'Small Roof Truss'",
        "material 450, 300, 200000",
        "static_factor 1.5",
        "node, Left, 0, 0",
        "node, Apex, 4, 3",
        "node, Right, 8, 0",
        "link Rafter1, Left, Apex",
        "link Rafter2, Apex, Right",
        "link Tie, Left, Right",
    ];

    // Import, derive geometry, report and lay out the scene
    let mut model = TrussModel::new();
    let mut scenes: Vec<Scene> = Vec::new();
    let output = process_lines(lines, &mut model, &SceneConfig::default(), &mut scenes)?;

    print!("{}", output.report.text);
    if let Some(longest) = output.report.longest {
        println!("Longest link: {longest}");
    }
    println!("Scene has {} grid lines", scenes[0].grid.len());

    Ok(())
}
