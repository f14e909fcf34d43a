use std::fmt::Display;

/// Prompt sent to the text generation service for a trip itinerary.
#[derive(Debug, Clone)]
pub struct ItineraryPrompt<'a> {
    pub destination: &'a str,
    /// Places in the order they should be visited
    pub places: &'a [&'a str],
    pub days: &'a str,
    pub season: &'a str,
    pub budget: &'a str,
    pub preferences: &'a str,
}

impl ItineraryPrompt<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for ItineraryPrompt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Generate a detailed travel itinerary for {} with optimized travel order:",
            self.destination
        )?;
        writeln!(f, "{}.", self.places.join(", "))?;
        writeln!(f, "Travel total days: {}.", self.days)?;
        writeln!(f, "Season: {}.", self.season)?;
        writeln!(f, "Budget: {}.", self.budget)?;
        writeln!(f, "Preferences: {}.", self.preferences)?;
        writeln!(f)?;
        writeln!(f, "The itinerary should include:")?;
        writeln!(f, "- Morning, afternoon, and evening activities")?;
        writeln!(f, "- Food recommendations")?;
        writeln!(f, "- Nearby attractions")?;
        writeln!(f, "- Time slots for each activity")?;
        writeln!(f, "- Weather information for the destination")?;
        writeln!(f, "- General tips for the traveller at the end, in bold text")?;
        writeln!(f)?;
        writeln!(f, "Generate the answer as plain text.")?;
        write!(
            f,
            "Do not add any extra text such as \"Here is the itinerary\", start directly with the itinerary."
        )
    }
}
