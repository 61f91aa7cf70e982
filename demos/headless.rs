use qmaze::{
    algo::{QGridAgent, QGridAgentConfig},
    grid::{CellKind, GridSnapshot, GridWorld, Position},
};

fn main() {
    let size = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(6);

    let grid = GridWorld::new(size).expect("grid size must fit the hole count");
    let mut agent = QGridAgent::new(grid, QGridAgentConfig::default());

    println!("initial board ({size}x{size}):");
    render(&agent.grid().snapshot());

    loop {
        let update = agent.step();
        println!("agent -> ({}, {})", update.to.row, update.to.col);
        if update.reached_goal {
            let steps = agent.report.get("steps").unwrap();
            println!("reached the goal in {steps} steps");
            break;
        }
    }

    println!("learned values:");
    let snapshot = agent.grid().snapshot();
    for row in 0..snapshot.size() {
        let line: Vec<String> = (0..snapshot.size())
            .map(|col| format!("{:9.2}", snapshot.cell(Position::new(row, col)).q_value))
            .collect();
        println!("{}", line.join(" "));
    }
}

fn render(snapshot: &GridSnapshot) {
    for row in 0..snapshot.size() {
        let line: String = (0..snapshot.size())
            .map(|col| match snapshot.cell(Position::new(row, col)).kind {
                CellKind::Start => 'A',
                CellKind::Finish => 'G',
                CellKind::Hole => 'O',
                CellKind::Idle => '.',
            })
            .collect();
        println!("{line}");
    }
}
